use std::process::ExitCode;

/// Process exit status of a stats command.
///
/// - `Success` (0): the command wrote usable output
/// - `Failure` (1): the command ran but produced nothing usable (no locale
///   with data, an empty dataset, an existing config file)
/// - `Error` (2): the command aborted (config error, unreadable reference,
///   locked or malformed dataset)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Ran to completion without usable output.
    Failure,
    /// Aborted before writing anything.
    Error,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
