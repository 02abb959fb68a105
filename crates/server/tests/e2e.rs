use std::net::SocketAddr;
use std::sync::Arc;

use configs::DatabaseConfig;
use models::AnimalId;
use reqwest::StatusCode as HttpStatusCode;
use service::{AnimalService, MongoAnimalRepository};
use tokio::net::TcpListener;

use server::{build_router, AppState};

// Runs against a real MongoDB; skipped unless MONGO_URI is set.
struct TestApp {
    base_url: String,
    db: mongodb::Database,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let uri = std::env::var("MONGO_URI").map_err(|_| anyhow::anyhow!("missing MONGO_URI"))?;

    // isolated database per test run
    let cfg = DatabaseConfig {
        uri,
        name: format!("animal_shelter_test_{}", AnimalId::generate()),
        ..DatabaseConfig::default()
    };
    let db = models::db::connect(&cfg).await?;
    models::db::ping(&db).await?;

    let repo = Arc::new(MongoAnimalRepository::new(db.clone()));
    let app = build_router(AppState::new(AnimalService::new(repo)));
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, db })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("reqwest client")
}

fn skip() -> bool {
    std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("MONGO_URI").is_err()
}

/// Ids appear in the list page as `data-id="<hex>"`.
fn listed_ids(html: &str) -> Vec<String> {
    html.split("data-id=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn e2e_create_update_delete() -> anyhow::Result<()> {
    if skip() { return Ok(()); }
    let app = start_server().await?;
    let c = client();

    let res = c.post(format!("{}/animals/create", app.base_url))
        .form(&[("name", "Rexy"), ("breed", "Labrador"), ("age", "3"), ("type", "Dog")])
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::SEE_OTHER);

    let html = c.get(format!("{}/animals", app.base_url)).send().await?.text().await?;
    let ids = listed_ids(&html);
    assert_eq!(ids.len(), 1);
    let id = ids[0].clone();
    assert!(html.contains("<td>Rexy</td>"));

    // update accepts values create would reject
    let res = c.post(format!("{}/animals/update/{}", app.base_url, id))
        .form(&[("name", "ab"), ("breed", "Labrador"), ("age", "4"), ("type", "Dog")])
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::SEE_OTHER);
    let html = c.get(format!("{}/animals", app.base_url)).send().await?.text().await?;
    assert!(html.contains("<td>ab</td>"));
    assert!(html.contains("<td>4</td>"));

    let res = c.post(format!("{}/animals/delete/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::SEE_OTHER);
    let html = c.get(format!("{}/animals", app.base_url)).send().await?.text().await?;
    assert!(listed_ids(&html).is_empty());

    let res = c.get(format!("{}/animals/update/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    app.db.drop(None).await?;
    Ok(())
}

#[tokio::test]
async fn e2e_rejected_create_writes_nothing() -> anyhow::Result<()> {
    if skip() { return Ok(()); }
    let app = start_server().await?;
    let c = client();

    let res = c.post(format!("{}/animals/create", app.base_url))
        .form(&[("name", "ab"), ("breed", "Labrador"), ("age", "-5"), ("type", "Dog")])
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.text().await?;
    assert!(body.contains("Please ensure that name has more than 3 characters"));
    assert!(body.contains("Please ensure that age is positive"));

    let html = c.get(format!("{}/animals", app.base_url)).send().await?.text().await?;
    assert!(listed_ids(&html).is_empty());

    app.db.drop(None).await?;
    Ok(())
}
