use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use pawrec_engine::{Engine, EntityKind, MemoryViewHistory};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendRequest {
    user_id: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendAnimalsResponse {
    recommended_animals: Vec<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendGroupsResponse {
    recommended_groups: Vec<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordViewRequest {
    user_id: i64,
    entity_id: i64,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        engine: Arc<Engine>,
        history: Arc<MemoryViewHistory>,
        port: u16,
    ) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(engine.clone()))
                .app_data(web::Data::new(history.clone()))
                .route("/healthz", web::get().to(healthz))
                .route("/recommend/animal", web::post().to(recommend_animals))
                .route("/recommend/group", web::post().to(recommend_groups))
                .route("/animals/introductions", web::post().to(trigger_enrichment))
                .route("/index/{kind}/refresh", web::post().to(refresh_index))
                .route("/views/{kind}", web::post().to(record_view))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

async fn healthz() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

async fn recommend_animals(
    engine: web::Data<Arc<Engine>>,
    req: web::Json<RecommendRequest>,
) -> ActixResult<HttpResponse> {
    match engine
        .recommend_for_user(req.user_id, EntityKind::Animal)
        .await
    {
        Ok(ids) => Ok(HttpResponse::Ok().json(RecommendAnimalsResponse {
            recommended_animals: ids,
        })),
        Err(e) => Ok(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": e.to_string()
        }))),
    }
}

async fn recommend_groups(
    engine: web::Data<Arc<Engine>>,
    req: web::Json<RecommendRequest>,
) -> ActixResult<HttpResponse> {
    match engine
        .recommend_for_user(req.user_id, EntityKind::Group)
        .await
    {
        Ok(ids) => Ok(HttpResponse::Ok().json(RecommendGroupsResponse {
            recommended_groups: ids,
        })),
        Err(e) => Ok(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": e.to_string()
        }))),
    }
}

/// Enqueue a detached enrichment run; the response does not wait for it.
async fn trigger_enrichment(engine: web::Data<Arc<Engine>>) -> ActixResult<HttpResponse> {
    let accepted = engine.trigger_enrichment();
    Ok(HttpResponse::Accepted().json(serde_json::json!({ "accepted": accepted })))
}

async fn refresh_index(
    engine: web::Data<Arc<Engine>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let Ok(kind) = path.into_inner().parse::<EntityKind>() else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "unknown collection kind"
        })));
    };

    match engine.refresh(kind).await {
        Ok(added) => Ok(HttpResponse::Ok().json(serde_json::json!({ "added": added }))),
        Err(e) => Ok(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": e.to_string()
        }))),
    }
}

async fn record_view(
    history: web::Data<Arc<MemoryViewHistory>>,
    path: web::Path<String>,
    req: web::Json<RecordViewRequest>,
) -> ActixResult<HttpResponse> {
    let Ok(kind) = path.into_inner().parse::<EntityKind>() else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "unknown collection kind"
        })));
    };

    history.record(req.user_id, kind, req.entity_id);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "recorded": true })))
}
