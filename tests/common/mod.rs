use std::sync::Arc;
use std::time::Duration;

use axum::{extract::Request, ServiceExt};
use chrono::NaiveTime;
use fastfoodfast::{create_app, services::FixedClock, ApiState, Metrics, RouterOptions};
use reqwest::Client;
use tokio::net::TcpListener;

pub struct TestEnvironment {
    pub client: Client,
    pub base_url: String,
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

impl TestEnvironment {
    /// Server whose clock reads 10AM against a 10PM closing time
    pub async fn new() -> Self {
        Self::with_clock(time(22, 0), time(10, 0)).await
    }

    /// Server with orders closing at `closing` and a clock fixed at `now`
    pub async fn with_clock(closing: NaiveTime, now: NaiveTime) -> Self {
        let metrics = Arc::new(Metrics::new().expect("Failed to create metrics"));
        let state = ApiState::in_memory(closing, Arc::new(FixedClock(now)), metrics);
        let app = create_app(state, RouterOptions::default());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local address");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
                .await
                .expect("Failed to serve app");
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(50)).await;

        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v2{}", self.base_url, path)
    }
}
