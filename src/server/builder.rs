//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::EntityRegistry;
use super::exposure::RestExposure;
use crate::config::RegistrarConfig;
use crate::core::error::ConfigError;
use crate::core::module::Module;
use anyhow::Result;
use axum::Router;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for creating HTTP servers with auto-registered routes
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(RegistrarConfig::from_yaml_file("registrar.yaml")?)
///     .register_module(SchoolModule::in_memory())
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: RegistrarConfig,
    modules: Vec<Arc<dyn Module>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: RegistrarConfig::default(),
            modules: Vec::new(),
            custom_routes: Vec::new(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: RegistrarConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for endpoints that don't fit the CRUD pattern, such as
    /// report cards or timetable exports.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Register a module
    ///
    /// Its entities are registered when the router is built, so the
    /// configuration may be set before or after.
    pub fn register_module(mut self, module: impl Module + 'static) -> Self {
        tracing::debug!(module = module.name(), version = module.version(), "module registered");
        self.modules.push(Arc::new(module));
        self
    }

    pub fn config(&self) -> &RegistrarConfig {
        &self.config
    }

    /// Collect the entity descriptors of every module
    ///
    /// Fails when the configuration names an entity no module provides, or
    /// when two entities would share a URL segment.
    pub fn build_registry(&self) -> Result<EntityRegistry, ConfigError> {
        self.config.validate()?;

        let known: HashSet<&str> = self
            .modules
            .iter()
            .flat_map(|module| module.entity_types())
            .collect();
        if let Some(unknown) = self
            .config
            .entities
            .iter()
            .find(|e| !known.contains(e.singular.as_str()))
        {
            return Err(ConfigError::InvalidValue {
                field: "entities".to_string(),
                message: format!("unknown entity '{}'", unknown.singular),
            });
        }

        let mut registry = EntityRegistry::new();
        for module in &self.modules {
            module.register_entities(&mut registry, &self.config);
        }

        let mut plurals = HashSet::new();
        for entity_type in registry.entity_types() {
            let plural = registry.plural(entity_type).unwrap_or(entity_type);
            if !plurals.insert(plural) {
                return Err(ConfigError::InvalidValue {
                    field: "entities".to_string(),
                    message: format!("URL segment '/{}' is used twice", plural),
                });
            }
        }

        Ok(registry)
    }

    /// Build the final REST router
    ///
    /// This generates:
    /// - Health routes (`/health`, `/healthz`)
    /// - CRUD routes for all enabled entities
    /// - Custom routes
    pub fn build(mut self) -> Result<Router> {
        let registry = self.build_registry()?;
        let custom_routes = std::mem::take(&mut self.custom_routes);

        if registry.is_empty() {
            tracing::warn!("no entities enabled, only health routes are served");
        }
        tracing::info!(
            count = registry.len(),
            entities = ?registry.entity_types(),
            "routes built"
        );

        Ok(RestExposure::build_router(&registry, custom_routes).layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the configured address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.address();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
