use coffee_shop::{configuration::Settings, models::{Coffee, Customer, OrderDetail, OrderWithDetails}, startup::{get_connection_pool, Application}, telemetry::{get_subscriber, init_subscriber}, utils::DbPool};
use once_cell::sync::Lazy;
use serde::Deserialize;
use uuid::Uuid;

static LOGGER_INSTANCE: Lazy<()> = Lazy::new(|| {
    let log_level = "info".to_string();
    let name = "coffee-shop-test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name, log_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(name, log_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp{
    pub host: String,
    pub port: u16,
    pub pool: DbPool,
    pub api_client: reqwest::Client
}

#[derive(Deserialize, Debug)]
pub struct CoffeesCreated{
    pub message: String,
    pub coffees: Vec<Coffee>
}

#[derive(Deserialize, Debug)]
pub struct CoffeeUpdated{
    pub message: String,
    pub coffee: Coffee
}

#[derive(Deserialize, Debug)]
pub struct CustomersCreated{
    pub message: String,
    pub customers: Vec<Customer>
}

#[derive(Deserialize, Debug)]
pub struct OrderCreated{
    pub message: String,
    pub order: OrderWithDetails
}

#[derive(Deserialize, Debug)]
pub struct OrderDetailCreated{
    pub message: String,
    #[serde(rename = "orderDetail")]
    pub order_detail: OrderDetail
}

#[derive(Deserialize, Debug)]
pub struct ErrorResponse{
    pub error: String
}

impl TestApp {
    pub fn get_app_url(&self) -> String{
        format!("http://{}:{}", self.host, self.port)
    }

    // Every test gets its own database file
    pub async fn spawn_app() -> TestApp{
        Lazy::force(&LOGGER_INSTANCE);

        let mut settings = Settings::get().expect("Failed to read configuration");
        settings.application.host = "127.0.0.1".to_string();
        settings.application.port = 0;
        settings.database.max_connections = 4;
        settings.database.path = std::env::temp_dir()
            .join(format!("coffee_shop_{}.db", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned();

        let application = Application::build(settings.clone())
                            .await
                            .expect("Failed to build application");

        let pool = get_connection_pool(&settings.database)
                    .expect("Failed to build connection pool to test database");

        let host = application.host.clone();
        let port = application.port;
        tokio::task::spawn(application.run_until_stopped());

        TestApp{
            host,
            port,
            pool,
            api_client: reqwest::Client::new()
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response{
        self.api_client.get(format!("{}{}", self.get_app_url(), path))
            .send()
            .await
            .expect("Failed to send GET request")
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response{
        self.api_client.post(format!("{}{}", self.get_app_url(), path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request")
    }

    pub async fn put_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response{
        self.api_client.put(format!("{}{}", self.get_app_url(), path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request")
    }

    pub async fn post_coffee(&self, name: &str, price: f64) -> reqwest::Response{
        self.post_json("/coffees", &serde_json::json!({
            "CoffeeName": name,
            "Price": price
        }))
        .await
    }

    pub async fn create_coffee(&self, name: &str, price: f64) -> Coffee{
        let response = self.post_coffee(name, price).await;
        assert_eq!(response.status().as_u16(), 201);

        let body: CoffeesCreated = response.json().await.unwrap();
        body.coffees.into_iter()
            .find(|coffee| coffee.coffee_name == name)
            .expect("Created coffee missing from list")
    }

    pub async fn get_coffees(&self, query: &str) -> Vec<Coffee>{
        let response = self.get(&format!("/coffees{}", query)).await;
        assert_eq!(response.status().as_u16(), 200);
        response.json().await.unwrap()
    }

    pub async fn get_orders(&self, query: &str) -> Vec<OrderWithDetails>{
        let response = self.get(&format!("/orders{}", query)).await;
        assert_eq!(response.status().as_u16(), 200);
        response.json().await.unwrap()
    }
}
