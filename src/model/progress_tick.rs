/// Transport progress of the file currently being uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTick {
    /// Body bytes handed to the connection so far
    pub bytes_sent: u64,
    /// Length of the body, `None` when the transport cannot tell
    pub bytes_total: Option<u64>,
}

impl ProgressTick {
    pub fn is_length_computable(&self) -> bool {
        self.bytes_total.is_some()
    }
}
