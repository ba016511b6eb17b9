#[actix_web::main]
async fn main() -> Result<(), dharma_gates_server::ServerError> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    dharma_gates_server::run_server().await
}
