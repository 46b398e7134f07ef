mod cli;
mod infra;
mod presentation;
mod report;
mod routes;
mod server;

use probable_immunity::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
