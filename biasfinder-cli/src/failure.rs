use biasfinder_lib::{Error, collection::ToggleRefused, proposal::Invalid};
use sysexits::ExitCode;
use thiserror::Error;

/// Why a command did not complete
#[derive(Debug, Error)]
pub enum Failure {
    #[error(transparent)]
    Backend(#[from] Error),
    /// A proposal the backend refused or never received. `message` is what the form reported.
    #[error("{message}")]
    Proposal {
        message: String,
        #[source]
        cause: Error,
    },
    #[error(transparent)]
    Refused(#[from] ToggleRefused),
    #[error(transparent)]
    Invalid(#[from] Invalid),
    #[error("{0}")]
    Unknown(String),
    #[error("Moderation is only available to the admin user (--user 0)")]
    NotAdmin,
}

impl Failure {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Failure::Backend(e) | Failure::Proposal { cause: e, .. } => backend_exit_code(e),
            Failure::Refused(ToggleRefused::AdminMode) | Failure::NotAdmin => ExitCode::NoPerm,
            Failure::Refused(_) | Failure::Invalid(_) | Failure::Unknown(_) => ExitCode::DataErr,
        }
    }
}

fn backend_exit_code(e: &Error) -> ExitCode {
    match e {
        Error::Request(_) => ExitCode::Unavailable,
        // The backend didn't like what we sent
        Error::Server { status, .. } if (400..500).contains(status) => ExitCode::DataErr,
        Error::Server { .. } => ExitCode::Unavailable,
        Error::Parse(_) => ExitCode::Protocol,
        Error::InvalidUrl(_) | Error::ConfigIo(_) | Error::ConfigParse(_) | Error::ConfigWrite(_) => {
            ExitCode::Config
        }
    }
}

#[cfg(test)]
mod test {
    use biasfinder_lib::entities::{CardId, ListKind};

    use super::*;

    #[test]
    fn test_exit_codes() {
        let server = |status| Error::Server {
            status,
            message: String::new(),
        };

        assert_eq!(Failure::from(server(400)).exit_code(), ExitCode::DataErr);
        assert_eq!(Failure::from(server(503)).exit_code(), ExitCode::Unavailable);
        assert_eq!(
            Failure::from(Error::Parse("eof".into())).exit_code(),
            ExitCode::Protocol
        );
        assert_eq!(Failure::NotAdmin.exit_code(), ExitCode::NoPerm);
        assert_eq!(
            Failure::from(ToggleRefused::AdminMode).exit_code(),
            ExitCode::NoPerm
        );
        assert_eq!(
            Failure::from(ToggleRefused::HeldInOtherList {
                card: CardId(1),
                held_in: ListKind::Wishlist,
            })
            .exit_code(),
            ExitCode::DataErr
        );
        assert_eq!(
            Failure::from(Invalid::MissingName).exit_code(),
            ExitCode::DataErr
        );
    }

    #[test]
    fn test_proposal_failure_uses_form_message() {
        let failure = Failure::Proposal {
            message: "Error proposing the card: duplicate".into(),
            cause: Error::Server {
                status: 409,
                message: "duplicate".into(),
            },
        };

        assert_eq!(failure.to_string(), "Error proposing the card: duplicate");
        assert_eq!(failure.exit_code(), ExitCode::DataErr);
    }
}
