use thiserror::Error;

/// Packet allocation error conditions.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PacketError {
    #[error("Packet of {0} bytes exceeds the allocation ceiling")]
    TooLarge(usize),

    #[error("Backing buffer allocation failed")]
    AllocationFailed,
}
