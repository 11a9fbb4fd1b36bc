use super::params::Param;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fix styles that hand the integration over to an external driver process.
pub const DRIVER_FIX_STYLES: [&str; 2] = ["driver", "ipi"];

/// Unix-domain sockets are created under this prefix followed by the address.
pub const UNIX_SOCKET_PREFIX: &str = "/tmp/ipi_";

/// A `fix` directive, kept as an opaque command with its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixDecl {
    pub id: String,
    pub group: String,
    pub style: String,
    #[serde(default)]
    pub args: Vec<Param>,
}

impl FixDecl {
    pub fn is_driver(&self) -> bool {
        DRIVER_FIX_STYLES.contains(&self.style.as_str())
    }

    /// Interprets the arguments of a driver fix as a socket coupling.
    ///
    /// Returns `None` for fixes of any other style.
    pub fn driver_coupling(&self) -> Option<Result<DriverCoupling, DriverArgError>> {
        self.is_driver().then(|| DriverCoupling::from_args(&self.args))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocketMode {
    #[default]
    Inet,
    Unix,
}

impl fmt::Display for SocketMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inet => "inet",
            Self::Unix => "unix",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverArgError {
    #[error("driver fix requires an address and a port")]
    MissingArguments,
    #[error("invalid port '{0}' (expected an integer between 1 and 65535)")]
    InvalidPort(String),
    #[error("unexpected driver keyword '{0}' (expected 'unix' or 'reset')")]
    UnexpectedKeyword(String),
}

/// The socket a driver fix connects to: `ADDRESS PORT [unix] [reset]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverCoupling {
    pub address: String,
    pub port: u16,
    pub mode: SocketMode,
    pub reset: bool,
}

impl DriverCoupling {
    pub fn from_args(args: &[Param]) -> Result<Self, DriverArgError> {
        let [address, port, keywords @ ..] = args else {
            return Err(DriverArgError::MissingArguments);
        };
        let port = match port {
            Param::Int(p) => u16::try_from(*p).ok().filter(|p| *p > 0),
            _ => None,
        }
        .ok_or_else(|| DriverArgError::InvalidPort(port.to_string()))?;

        let mut coupling = Self {
            address: address.to_string(),
            port,
            mode: SocketMode::Inet,
            reset: false,
        };
        for keyword in keywords {
            match keyword.as_word() {
                Some("unix") => coupling.mode = SocketMode::Unix,
                Some("reset") => coupling.reset = true,
                _ => return Err(DriverArgError::UnexpectedKeyword(keyword.to_string())),
            }
        }
        Ok(coupling)
    }

    pub fn endpoint(&self) -> SocketEndpoint {
        match self.mode {
            SocketMode::Unix => SocketEndpoint::Unix(PathBuf::from(format!(
                "{}{}",
                UNIX_SOCKET_PREFIX, self.address
            ))),
            SocketMode::Inet => SocketEndpoint::Inet {
                host: self.address.clone(),
                port: self.port,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEndpoint {
    Unix(PathBuf),
    Inet { host: String, port: u16 },
}

impl fmt::Display for SocketEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix(path) => write!(f, "unix://{}", path.display()),
            Self::Inet { host, port } => write!(f, "inet://{}:{}", host, port),
        }
    }
}
