use pairsheet_service::config::{Settings, SheetSettings};
use pairsheet_service::services::MemorySheetClient;
use pairsheet_service::startup::Application;
use secrecy::Secret;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub sheet: MemorySheetClient,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(MemorySheetClient::new()).await
    }

    pub async fn spawn_with(sheet: MemorySheetClient) -> Self {
        // Use random port for testing (port 0)
        let settings = Settings {
            port: 0,
            sheet: SheetSettings {
                sheet_id: "test-sheet".to_string(),
                service_email: "svc@test.local".to_string(),
                service_key: Secret::new("test-key".to_string()),
            },
        };

        let app = Application::build(&settings, Arc::new(sheet.clone()))
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp { address, sheet }
    }
}
