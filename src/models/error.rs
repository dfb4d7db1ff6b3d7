//! Instance construction errors.

/// Structural problems detected while assembling an [`Instance`](super::Instance).
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceError {
    /// The node list is empty.
    NoNodes,
    /// Node 0 is not flagged as the depot.
    MissingDepot,
    /// A node's id does not match its position in the node list.
    NodeIdMismatch {
        /// Position in the list.
        index: usize,
        /// Id carried by the node.
        id: usize,
    },
    /// A matrix does not cover exactly the node set.
    MatrixSizeMismatch {
        /// Which matrix.
        matrix: String,
        /// Node count.
        expected: usize,
        /// Matrix size.
        actual: usize,
    },
    /// No travel-time band was supplied.
    NoTimeBands,
    /// A band has `start >= end`.
    EmptyBand {
        /// Band id.
        band: usize,
    },
    /// A scalar parameter is negative or non-finite.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}

impl std::fmt::Display for InstanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceError::NoNodes => write!(f, "instance has no nodes"),
            InstanceError::MissingDepot => write!(f, "node 0 must be the depot"),
            InstanceError::NodeIdMismatch { index, id } => {
                write!(f, "node at position {} carries id {}", index, id)
            }
            InstanceError::MatrixSizeMismatch {
                matrix,
                expected,
                actual,
            } => write!(
                f,
                "{} matrix is {}x{}, expected {}x{}",
                matrix, actual, actual, expected, expected
            ),
            InstanceError::NoTimeBands => write!(f, "no travel-time bands"),
            InstanceError::EmptyBand { band } => {
                write!(f, "time band {} has an empty interval", band)
            }
            InstanceError::InvalidParameter { name, value } => {
                write!(f, "parameter {} has invalid value {}", name, value)
            }
        }
    }
}

impl std::error::Error for InstanceError {}
