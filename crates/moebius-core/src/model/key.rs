//! Claves del registro de memoización.
//!
//! La separación data/meta es explícita en el tipo (no por reflexión):
//! - `Data` es una clave elegida por el test; su lectura puede disparar un
//!   build perezoso.
//! - `Meta` es una clave estructural/de protocolo (el análogo de una clave
//!   symbol); su lectura nunca intercepta ni memoiza.
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Clave de datos arbitraria (interceptable).
    Data(String),
    /// Clave estructural reservada a protocolos de la plataforma (bypass).
    Meta(String),
}

impl Key {
    pub fn data(name: impl Into<String>) -> Self {
        Key::Data(name.into())
    }

    pub fn meta(name: impl Into<String>) -> Self {
        Key::Meta(name.into())
    }

    /// Nombre plano de la clave, sin distinguir su clase.
    pub fn name(&self) -> &str {
        match self {
            Key::Data(name) | Key::Meta(name) => name,
        }
    }

    pub fn is_meta(&self) -> bool {
        matches!(self, Key::Meta(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Data(name) => write!(f, "{}", name),
            Key::Meta(name) => write!(f, "@{}", name),
        }
    }
}
