//! Constantes del pipeline core.
//!
//! Este módulo agrupa valores estáticos que participan en el cálculo de
//! fingerprints y en la forma observable del valor construido. Cambios en
//! `PIPELINE_VERSION` invalidan determinísticamente los fingerprints aunque
//! la definición no cambie (por diseño).

/// Versión lógica del pipeline. Se incluye en el fingerprint de cada build
/// para que un cambio de versión recalcule los fingerprints aunque las
/// etapas y sus parámetros no cambien. Mantener estable mientras no haya
/// cambios incompatibles.
pub const PIPELINE_VERSION: &str = "M1.0";

/// Forma textual fija del valor construido (hook de coerción a string).
pub const SENTINEL_TEXT: &str = "[whatever Moebius]";

/// Forma numérica fija del valor construido (hook de coerción numérica).
pub const SENTINEL_NUMBER: f64 = 42.0;

/// Clave que herramientas async consultan para detectar thenables. El
/// finalizador la deja en `Null` para que nadie intente await sobre el valor.
pub const THEN_KEY: &str = "then";

/// Clave que utilidades de mocking consultan para listar invocaciones
/// registradas. El finalizador la deja en `Null` tras el wrap opcional.
pub const CALLS_KEY: &str = "calls";
