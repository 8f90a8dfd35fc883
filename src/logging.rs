//! Inicialización de logs

/// Configurar el subscriber global de tracing
pub fn init(level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}
