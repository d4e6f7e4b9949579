use actix_cors::Cors;
use actix_web::{
    get, post, web, App, HttpResponse, HttpServer, Responder, Result as ActixResult,
};
use actix_ws::Message;
use branchcore::Flow;
use branchruntime::{FlowEngine, TaskRegistry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Application state shared across handlers
struct AppState {
    engine: Arc<FlowEngine>,
}

/// Request body for flow execution
#[derive(Debug, Deserialize)]
struct ExecuteRequest {
    flow: Flow,
}

/// Response for the task listing
#[derive(Debug, Serialize)]
struct TaskListResponse {
    tasks: Vec<String>,
}

/// Health check endpoint
#[get("/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "branchflow"
    }))
}

/// List registered task names
#[get("/api/tasks")]
async fn list_tasks(data: web::Data<AppState>) -> ActixResult<impl Responder> {
    let tasks = data.engine.registry().task_names();

    Ok(HttpResponse::Ok().json(TaskListResponse { tasks }))
}

/// Execute a flow definition and return the full execution result
#[post("/api/execute")]
async fn execute_flow(
    data: web::Data<AppState>,
    req: web::Json<ExecuteRequest>,
) -> ActixResult<impl Responder> {
    let flow = req.into_inner().flow;

    info!("Executing flow: {} ({})", flow.name, flow.id);

    let result = data.engine.execute(&flow).await;

    info!("Flow {} finished with status '{}'", flow.id, result.status());

    // All three statuses are payload, not transport errors
    Ok(HttpResponse::Ok().json(result))
}

/// WebSocket endpoint for real-time events
#[get("/api/events")]
async fn websocket_events(
    req: actix_web::HttpRequest,
    stream: web::Payload,
    data: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let (res, mut session, mut msg_stream) = actix_ws::handle(&req, stream)?;

    info!("WebSocket client connected");

    // Subscribe to events
    let mut events = data.engine.subscribe_events();

    actix_web::rt::spawn(async move {
        loop {
            tokio::select! {
                // Receive event from the engine
                event = events.recv() => {
                    match event {
                        Ok(event) => {
                            if let Ok(json) = serde_json::to_string(&event) {
                                if session.text(json).await.is_err() {
                                    break;
                                }
                            }
                        }
                        Err(_) => break,
                    }
                }

                // Handle incoming WebSocket messages (ping/pong)
                Some(Ok(msg)) = msg_stream.recv() => {
                    match msg {
                        Message::Ping(bytes) => {
                            if session.pong(&bytes).await.is_err() {
                                break;
                            }
                        }
                        Message::Close(_) => break,
                        _ => {}
                    }
                }

                else => break,
            }
        }

        info!("WebSocket client disconnected");
        let _ = session.close(None).await;
    });

    Ok(res)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚀 Starting branchflow server");

    // Build the registry once; it is read-only from here on
    let mut registry = TaskRegistry::new();
    branchtasks::register_all(&mut registry);

    let engine = FlowEngine::new(Arc::new(registry));

    info!("✅ Engine initialized with built-in tasks");

    let app_state = web::Data::new(AppState {
        engine: Arc::new(engine),
    });

    let bind_address = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:5000".to_string());

    info!("🌐 Server starting on http://{}", bind_address);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(app_state.clone())
            .wrap(cors)
            .wrap(actix_web::middleware::Logger::default())
            .service(health_check)
            .service(list_tasks)
            .service(execute_flow)
            .service(websocket_events)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
