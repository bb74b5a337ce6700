use actix_web::http::header::CONTENT_TYPE;
use actix_web::{web, HttpRequest, HttpResponse, Result};

use crate::ingest::{self, IngestError};
use crate::models::{
    AverageCloseResponse, AverageVwapResponse, ErrorResponse, HighestVolumeResponse, QueryFilter,
    UploadSummary,
};
use crate::services::query_service;
use crate::store::StockStore;

/// Declared content type must indicate CSV; parameters like
/// `;charset=utf-8` are tolerated.
fn declares_csv(req: &HttpRequest) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("text/csv"))
        .unwrap_or(false)
}

pub async fn upload_csv(
    req: HttpRequest,
    body: web::Bytes,
    store: web::Data<dyn StockStore>,
) -> Result<HttpResponse> {
    if body.is_empty() || !declares_csv(&req) {
        return Ok(HttpResponse::BadRequest()
            .json(ErrorResponse::new("Please upload a valid CSV file.")));
    }

    match ingest::ingest(body.as_ref(), store.get_ref()).await {
        Ok(report) => Ok(HttpResponse::Ok().json(UploadSummary::from(report))),
        Err(err @ IngestError::MissingColumns(_)) => {
            Ok(HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string())))
        }
        Err(IngestError::Header(err)) => Ok(HttpResponse::BadRequest().json(
            ErrorResponse::with_details("Please upload a valid CSV file.", err.to_string()),
        )),
        Err(IngestError::Storage(err)) => {
            log::error!("bulk persist failed: {err}");
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::with_details("Database error", err.to_string())))
        }
    }
}

pub async fn highest_volume(
    query: web::Query<QueryFilter>,
    store: web::Data<dyn StockStore>,
) -> Result<HttpResponse> {
    match query_service::highest_volume(store.get_ref(), &query).await {
        Ok(record) => Ok(HttpResponse::Ok().json(HighestVolumeResponse {
            highest_volume: record,
        })),
        Err(err) => {
            Ok(HttpResponse::InternalServerError().json(ErrorResponse::new(err.to_string())))
        }
    }
}

pub async fn average_close(
    query: web::Query<QueryFilter>,
    store: web::Data<dyn StockStore>,
) -> Result<HttpResponse> {
    match query_service::average_close(store.get_ref(), &query).await {
        Ok(average) => Ok(HttpResponse::Ok().json(AverageCloseResponse {
            average_close: average,
        })),
        Err(err) => {
            Ok(HttpResponse::InternalServerError().json(ErrorResponse::new(err.to_string())))
        }
    }
}

pub async fn average_vwap(
    query: web::Query<QueryFilter>,
    store: web::Data<dyn StockStore>,
) -> Result<HttpResponse> {
    match query_service::average_vwap(store.get_ref(), &query).await {
        Ok(average) => Ok(HttpResponse::Ok().json(AverageVwapResponse {
            average_vwap: average,
        })),
        Err(err) => {
            Ok(HttpResponse::InternalServerError().json(ErrorResponse::new(err.to_string())))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stocks")
            .route("/upload", web::post().to(upload_csv))
            .route("/api/highest_volume", web::get().to(highest_volume))
            .route("/api/average_close", web::get().to(average_close))
            .route("/api/average_vwap", web::get().to(average_vwap)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use actix_web::{test, App};
    use std::sync::Arc;

    const CSV_FILE: &str = "\
Date,Symbol,Series,Prev Close,Open,High,Low,Last,Close,VWAP,Volume,Turnover,Trades,Deliverable Volume,%Deliverable
25-08-2004,TCS,EQ,850,1198.7,1198.7,979,985,987.95,1008.32,17116372,1.72588E+15,5206360,5206360,0.3042
2004-08-26,TCS,EQ,987.95,992,997,975.3,983.6,979.0,984.68,12345678,1.2e14,40000,30000,0.25
26-08-2004,INFY,EQ,1240,1245,1255,1238,1251,1250.5,1248.1,900000,1.1e12,25000,12000,0.4
";

    fn shared_store() -> web::Data<dyn StockStore> {
        web::Data::from(Arc::new(MemoryStore::new()) as Arc<dyn StockStore>)
    }

    macro_rules! service {
        ($store:expr) => {
            test::init_service(App::new().app_data($store.clone()).configure(config)).await
        };
    }

    #[actix_web::test]
    async fn upload_rejects_a_non_csv_content_type() {
        let store = shared_store();
        let app = service!(store);

        let req = test::TestRequest::post()
            .uri("/stocks/upload")
            .insert_header((CONTENT_TYPE, "application/json"))
            .set_payload(CSV_FILE)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Please upload a valid CSV file.");
    }

    #[actix_web::test]
    async fn upload_rejects_an_empty_body() {
        let store = shared_store();
        let app = service!(store);

        let req = test::TestRequest::post()
            .uri("/stocks/upload")
            .insert_header((CONTENT_TYPE, "text/csv"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn upload_names_missing_columns() {
        let store = shared_store();
        let app = service!(store);

        let req = test::TestRequest::post()
            .uri("/stocks/upload")
            .insert_header((CONTENT_TYPE, "text/csv"))
            .set_payload("Date,Symbol,Series\n25-08-2004,TCS,EQ\n")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Missing columns: "));
        assert!(message.contains("Trades"));
    }

    #[actix_web::test]
    async fn upload_returns_the_ingestion_summary() {
        let store = shared_store();
        let app = service!(store);

        let req = test::TestRequest::post()
            .uri("/stocks/upload")
            .insert_header((CONTENT_TYPE, "text/csv"))
            .set_payload(CSV_FILE)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["totalRecords"], 3);
        assert_eq!(body["successfulRecords"], 2);
        assert_eq!(body["failedRecords"], 1);
        assert_eq!(body["errors"][0]["error"], "Invalid date format");
        assert_eq!(body["errors"][0]["row"]["Date"], "2004-08-26");
    }

    #[actix_web::test]
    async fn query_endpoints_read_what_upload_stored() {
        let store = shared_store();
        let app = service!(store);

        let upload = test::TestRequest::post()
            .uri("/stocks/upload")
            .insert_header((CONTENT_TYPE, "text/csv"))
            .set_payload(CSV_FILE)
            .to_request();
        assert_eq!(test::call_service(&app, upload).await.status(), 200);

        let req = test::TestRequest::get()
            .uri("/stocks/api/highest_volume?symbol=TCS")
            .to_request();
        let body: serde_json::Value =
            test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["highest_volume"]["volume"], 17116372u64);
        assert_eq!(body["highest_volume"]["turnover"], 1.72588e15);

        let req = test::TestRequest::get()
            .uri("/stocks/api/average_close?start_date=26-08-2004&end_date=26-08-2004")
            .to_request();
        let body: serde_json::Value =
            test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["average_close"], 1250.5);

        let req = test::TestRequest::get()
            .uri("/stocks/api/average_vwap?symbol=INFY")
            .to_request();
        let body: serde_json::Value =
            test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["average_vwap"], 1248.1);
    }

    #[actix_web::test]
    async fn empty_matches_yield_null_not_nan() {
        let store = shared_store();
        let app = service!(store);

        let req = test::TestRequest::get()
            .uri("/stocks/api/average_close?symbol=NOSUCH")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["average_close"].is_null());

        let req = test::TestRequest::get()
            .uri("/stocks/api/highest_volume?symbol=NOSUCH")
            .to_request();
        let body: serde_json::Value =
            test::read_body_json(test::call_service(&app, req).await).await;
        assert!(body["highest_volume"].is_null());
    }
}
