use crate::gallery::GalleryImageRef;
use crate::server::response::respond;
use crate::server::AppContext;
use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::get,
    Router,
};
use mediabridge_common::{AssetId, PageId};
use serde::{Deserialize, Serialize};

pub fn api_routes() -> Router<AppContext> {
    Router::new()
        .route("/filedata/:id", get(file_data))
        .route("/oembed", get(oembed))
        .route("/posts", get(posts))
        .route("/none", get(none))
        .route("/gallery", get(gallery))
}

async fn file_data(State(ctx): State<AppContext>, Path(id): Path<String>) -> Response {
    let descriptor = match id.parse::<AssetId>() {
        Ok(id) => ctx.descriptors.describe(id).await.into_logged_option("filedata"),
        Err(e) => {
            tracing::debug!("filedata: {}", e);
            None
        }
    };

    respond(descriptor, Some(ctx.config.cache.filedata_max_age))
}

#[derive(Deserialize)]
struct OEmbedQuery {
    url: Option<String>,
}

async fn oembed(State(ctx): State<AppContext>, Query(params): Query<OEmbedQuery>) -> Response {
    let url = params.url.as_deref().map(str::trim).unwrap_or_default();

    let data = if url.is_empty() {
        None
    } else {
        ctx.embeds.resolve(url).await.into_logged_option("oembed")
    };

    respond(data, Some(ctx.config.cache.oembed_max_age))
}

#[derive(Deserialize)]
struct PostsQuery {
    search: Option<String>,
    // Editors send this as free text; anything unparseable means "no limit"
    per_page: Option<String>,
}

#[derive(Serialize)]
struct RenderedText {
    rendered: String,
}

#[derive(Serialize)]
struct PostSummary {
    id: PageId,
    title: RenderedText,
    link: String,
}

async fn posts(State(ctx): State<AppContext>, Query(params): Query<PostsQuery>) -> Response {
    let term = params.search.unwrap_or_default();
    let limit = params
        .per_page
        .and_then(|p| p.trim().parse::<usize>().ok())
        .filter(|&n| n > 0);

    let pages: Vec<PostSummary> = ctx
        .pages
        .search(&term, limit)
        .await
        .into_iter()
        .map(|page| PostSummary {
            id: page.id,
            title: RenderedText {
                rendered: page.title,
            },
            link: page.link,
        })
        .collect();

    respond(Some(pages), None)
}

/// Placeholder listing for block types that have nothing to pick from.
async fn none() -> Response {
    respond(Some(Vec::<()>::new()), None)
}

#[derive(Deserialize)]
struct GalleryQuery {
    ids: Option<String>,
}

async fn gallery(State(ctx): State<AppContext>, Query(params): Query<GalleryQuery>) -> Response {
    let refs: Vec<GalleryImageRef> = params
        .ids
        .unwrap_or_default()
        .split(',')
        .filter_map(|id| id.parse::<AssetId>().ok())
        .map(GalleryImageRef::from)
        .collect();

    respond(Some(ctx.gallery.layout(&refs).await), None)
}
