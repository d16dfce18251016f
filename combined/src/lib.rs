//! Single-process wiring of the data, auth and gateway crates.

use auth_service_lib::build_authenticator;
use auth_service_lib::config::AuthServiceConfig;
use common::AppResult;
use data_service_lib::config::DataServiceConfig;
use data_service_lib::{open_store, DataServices};
use gateway_lib::config::GatewayConfig;
use gateway_lib::state::AppState;

/// Configuration of every component.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data: DataServiceConfig,
    pub auth: AuthServiceConfig,
    pub gateway: GatewayConfig,
}

impl Settings {
    /// Load all sections from the environment.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            data: DataServiceConfig::from_env(),
            auth: AuthServiceConfig::from_env()?,
            gateway: GatewayConfig::from_env(),
        })
    }
}

/// Open the store and build the gateway state on top of it.
pub async fn build_state(settings: &Settings) -> AppResult<AppState> {
    let store = open_store(&settings.data).await?;
    let data = DataServices::new(store, settings.auth.refresh_token_ttl);
    let auth = build_authenticator(&settings.auth, &data);

    Ok(AppState::new(
        auth,
        data.user_service.clone(),
        data.post_service.clone(),
        settings.gateway.clone(),
    ))
}

/// Create the store file if it does not exist yet.
pub async fn init(settings: &Settings) -> AppResult<()> {
    open_store(&settings.data).await.map(|_| ())
}

/// Run the server until it stops.
pub async fn serve(settings: &Settings) -> AppResult<()> {
    let state = build_state(settings).await?;
    gateway_lib::serve(state).await
}
