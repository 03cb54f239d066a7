//! Network-related configuration types

use std::num::NonZeroU16;
use std::str::FromStr;

use crate::types::ValidationError;

nonzero_newtype! {
    /// A validated network port number that cannot be zero
    ///
    /// # Examples
    /// ```
    /// use gnb_monitor::types::Port;
    ///
    /// let port = Port::new(5000).unwrap();
    /// assert_eq!(port.get(), 5000);
    ///
    /// // Port 0 is invalid
    /// assert!(Port::new(0).is_none());
    /// ```
    #[doc(alias = "tcp_port")]
    pub struct Port(NonZeroU16: u16);
}

impl Port {
    /// Default dashboard listen port
    pub const DEFAULT: Self = Self::literal(crate::constants::defaults::PORT);
}

impl Default for Port {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for Port {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let port = s
            .parse::<u16>()
            .map_err(|_| ValidationError::InvalidPortNumber(s.to_string()))?;
        Self::try_from(port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_default() {
        assert_eq!(Port::default().get(), 5000);
    }

    #[test]
    fn test_port_from_str() {
        let port: Port = "8080".parse().unwrap();
        assert_eq!(port.get(), 8080);
    }

    #[test]
    fn test_port_from_str_zero() {
        let result: Result<Port, _> = "0".parse();
        assert_eq!(result, Err(ValidationError::Zero("Port")));
    }

    #[test]
    fn test_port_from_str_garbage() {
        let result: Result<Port, _> = "http".parse();
        assert!(matches!(result, Err(ValidationError::InvalidPortNumber(_))));
    }

    #[test]
    fn test_port_try_from_zero() {
        assert!(Port::try_from(0u16).is_err());
        assert_eq!(Port::try_from(65535u16).unwrap().get(), 65535);
    }
}
