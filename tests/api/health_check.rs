use crate::helpers::TestApp;

#[actix_web::test]
async fn check_health_route(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/health").await;

    assert_eq!(response.status().as_u16(), 200)
}

#[actix_web::test]
async fn root_route_greets_caller(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/").await;
    assert_eq!(response.status().as_u16(), 200);

    let body = response.text().await.unwrap();
    assert_eq!(body, "Welcome to Coffee Shop API!");
}
