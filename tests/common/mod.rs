// tests/common/mod.rs

#![allow(dead_code)]

use std::io::Cursor;

use quizdeck::{
    config::{Config, PublishConfig},
    routes,
    state::AppState,
};

/// Convert-only configuration: no remote-store token, no upload token.
pub fn test_config() -> Config {
    Config {
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        static_dir: "tests/no-static-files".to_string(),
        upload_token: None,
        allowed_origins: Vec::new(),
        github_token: None,
        github_api_url: "https://api.github.com".parse().unwrap(),
        publish: PublishConfig {
            owner: Some("acme".to_string()),
            repo: Some("quiz-site".to_string()),
            branch: "main".to_string(),
            public_root: "public".to_string(),
            quiz_dir: "data/quizzes".to_string(),
            index_path: "data/quiz-index.json".to_string(),
            public_base_url: None,
        },
    }
}

/// Spawns the app on a random port and returns its base URL.
pub async fn spawn_app(config: Config) -> String {
    let state = AppState::new(config).expect("Failed to build app state");
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

/// Builds a minimal single-sheet workbook.
pub fn build_xlsx(cells: &[(&str, &str)]) -> Vec<u8> {
    let mut book = umya_spreadsheet::new_file();
    {
        let sheet = book.get_sheet_mut(&0).unwrap();
        for &(coord, value) in cells {
            sheet.get_cell_mut(coord).set_value(value);
        }
    }
    let mut cursor = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut cursor).unwrap();
    cursor.into_inner()
}

pub fn geography_sheet() -> Vec<u8> {
    build_xlsx(&[
        ("A1", "Question"),
        ("B1", "Answer"),
        ("C1", "Also accept"),
        ("A2", "Capital of France?"),
        ("B2", "Paris"),
        ("A3", "Longest river?"),
        ("B3", "Nile"),
        ("C3", "The Nile, River Nile"),
        ("A5", "Capital of Peru?"),
        ("B5", "Lima"),
    ])
}

pub async fn post_xlsx(
    client: &reqwest::Client,
    address: &str,
    title: Option<&str>,
    bytes: Vec<u8>,
) -> reqwest::Response {
    let part = reqwest::multipart::Part::bytes(bytes).file_name("geography.xlsx");
    let mut form = reqwest::multipart::Form::new().part("file", part);
    if let Some(title) = title {
        form = form.text("title", title.to_string());
    }

    client
        .post(format!("{}/api/upload-excel", address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request")
}
