use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use tokio::task::JoinError;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::ApiConfig;
use crate::database::EmployeeStore;
use crate::handlers::{self, system};
use crate::services::{EmployeeService, ManagerService};

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub employees: EmployeeService,
    pub managers: ManagerService,
}

impl AppState {
    pub fn new(store: Arc<dyn EmployeeStore>, timeout: Duration) -> Self {
        Self {
            employees: EmployeeService::new(store.clone(), timeout),
            managers: ManagerService::new(store, timeout),
        }
    }
}

pub fn app(state: AppState, api: &ApiConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(employee_routes())
        .merge(manager_routes())
        .fallback(system::not_found)
        .with_state(state);

    if api.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn employee_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/employees",
            get(handlers::employees_list)
                .post(handlers::employee_post)
                .delete(handlers::employees_delete),
        )
        .route("/employees/:email", get(handlers::employee_get))
}

fn manager_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/employees/:email/manager",
            put(handlers::manager_put)
                .get(handlers::manager_get)
                .delete(handlers::manager_delete),
        )
        .route("/employees/:email/subordinates", get(handlers::subordinates_get))
}

/// Serve `router` until `shutdown` resolves, then stop accepting and give
/// in-flight requests up to `grace` to finish before aborting them.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F, grace: Duration) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => return join_result(result),
        _ = shutdown => {}
    }

    info!("Draining in-flight requests (grace period {:?})", grace);
    let _ = stop_tx.send(());

    match tokio::time::timeout(grace, &mut server).await {
        Ok(result) => join_result(result),
        Err(_) => {
            warn!("Grace period elapsed, aborting remaining requests");
            server.abort();
            Ok(())
        }
    }
}

fn join_result(result: Result<io::Result<()>, JoinError>) -> io::Result<()> {
    result.map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        }
    }
}
