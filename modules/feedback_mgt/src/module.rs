use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::FeedbackMgtConfig;
use crate::contract::client::FeedbackMgtApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::FeedbackMgtLocalClient;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::SeaOrmFeedbackRepository;

/// Wired feedback_mgt module: one stateless service shared by the REST layer
/// and the in-process client.
#[derive(Clone)]
pub struct FeedbackMgt {
    service: Arc<Service>,
}

impl FeedbackMgt {
    /// Key of this module's section under `modules` in the app config.
    pub const NAME: &'static str = "feedback_mgt";

    /// Build the module on top of an open connection. Run [`FeedbackMgt::migrate`] first.
    pub fn new(conn: DatabaseConnection, cfg: &FeedbackMgtConfig) -> Self {
        info!("Initializing feedback_mgt module");
        debug!(
            "Loaded feedback_mgt config: default_search_limit={}, require_message_on_update={}",
            cfg.default_search_limit, cfg.require_message_on_update
        );

        // Wire repository (infra) to domain service (port)
        let repo = SeaOrmFeedbackRepository::new(conn);
        let service_config = ServiceConfig {
            default_search_limit: cfg.default_search_limit,
            require_message_on_update: cfg.require_message_on_update,
        };
        let service = Service::new(Arc::new(repo), service_config);

        Self {
            service: Arc::new(service),
        }
    }

    /// Create or upgrade the feedback tables.
    pub async fn migrate(conn: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running feedback_mgt database migrations");
        Migrator::up(conn, None).await?;
        info!("Feedback database migrations completed successfully");
        Ok(())
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// Local in-process client for other modules.
    pub fn client(&self) -> Arc<dyn FeedbackMgtApi> {
        Arc::new(FeedbackMgtLocalClient::new(self.service.clone()))
    }

    /// Register the REST routes on `router`.
    pub fn register_rest(&self, router: Router) -> Router {
        info!("Registering feedback_mgt REST routes");
        routes::register_routes(router, self.service.clone())
    }
}
