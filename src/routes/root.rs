use actix_web::HttpResponse;

#[tracing::instrument(
    "Greeting api caller"
)]
pub async fn welcome() -> HttpResponse{
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Welcome to Coffee Shop API!")
}

// Liveness probe, answers without touching the database
#[tracing::instrument(
    "Checking if coffee shop api is online"
)]
pub async fn health_check() -> HttpResponse{
    HttpResponse::Ok().body("Working")
}
