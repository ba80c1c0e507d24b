use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{fs, io};

use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::{error, info, warn};

use crate::config::{Config, Site};
use crate::content_index::ContentIndex;
use crate::feed::select_feed;
use crate::paginator::Paginator;
use crate::post::Post;
use crate::presenter::PostPresenter;
use crate::query_string::QueryString;
use crate::tags::tag_slug;
use crate::view::home_renderer::HomeRenderer;
use crate::view::list_renderer::{ListPageInput, ListRenderer};
use crate::view::post_renderer::PostRenderer;

struct AppState {
    index: ContentIndex,
    presenter: PostPresenter,
    home: HomeRenderer,
    list: ListRenderer,
    post: PostRenderer,
    site: Site,
    public_dir: PathBuf,
}

type State = web::types::State<Arc<AppState>>;

fn html(body: String) -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn redirect(location: String) -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Location", location)
        .content_type("text/html; charset=utf-8")
        .finish()
}

fn plain(mut builder: web::HttpResponseBuilder, body: String) -> web::HttpResponse {
    builder
        .content_type("text/plain; charset=utf-8")
        .body(body)
}

fn get_cur_page(req: &HttpRequest) -> u32 {
    match req.uri().query() {
        Some(query_str) => QueryString::from(query_str).get_page(),
        None => 1,
    }
}

fn render_list(state: &AppState, heading: &str, base_link: &str, posts: &[&Post], cur_page: u32) -> io::Result<String> {
    let paginator = Paginator::from(posts, state.site.page_size);
    let cur_page = paginator.sanitize(cur_page);
    let page = match paginator.get_page(cur_page) {
        Ok(page) => page,
        // An empty listing has no pages, it is still rendered
        Err(_) if paginator.page_count() == 0 => &[],
        Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidInput, e.to_string())),
    };

    let tags = state.index.tag_counts();
    Ok(state.list.render(&state.site.title, &ListPageInput {
        heading,
        base_link,
        posts: page,
        cur_page,
        page_count: paginator.page_count(),
        tags: &tags,
    }))
}

#[web::get("/")]
async fn home_page(state: State) -> web::HttpResponse {
    let selection = select_feed(state.index.posts(), state.site.max_display);
    html(state.home.render(&selection, &state.site.title))
}

// Begin: Redirect region --------
#[web::get("/blog")]
async fn blog_wo_slash() -> web::HttpResponse {
    redirect("/blog/".to_string())
}

#[web::get("/tags/{tag}")]
async fn tag_wo_slash(tag: web::types::Path<String>) -> web::HttpResponse {
    redirect(format!("/tags/{}/", tag.into_inner()))
}
// End: Redirect region --------

#[web::get("/blog/")]
async fn blog_list(req: HttpRequest, state: State) -> web::HttpResponse {
    let posts: Vec<&Post> = state.index.posts().iter().collect();
    match render_list(&state, "All posts", "/blog/", &posts, get_cur_page(&req)) {
        Ok(rendered) => html(rendered),
        Err(e) => {
            error!("Error listing posts: {}", e);
            plain(web::HttpResponse::InternalServerError(), format!("Error listing posts: {}", e))
        }
    }
}

#[web::get("/tags/{tag}/")]
async fn tag_list(req: HttpRequest, tag: web::types::Path<String>, state: State) -> web::HttpResponse {
    let tag = tag_slug(&tag.into_inner());
    let posts = state.index.with_tag(&tag);
    if posts.is_empty() {
        return plain(web::HttpResponse::NotFound(), format!("No posts tagged {}", tag));
    }

    let base_link = format!("/tags/{}/", tag);
    match render_list(&state, &tag, &base_link, &posts, get_cur_page(&req)) {
        Ok(rendered) => html(rendered),
        Err(e) => {
            error!("Error listing tag {}: {}", tag, e);
            plain(web::HttpResponse::InternalServerError(), format!("Error listing posts: {}", e))
        }
    }
}

// Post pages are served under their content path, e.g. `/blog/nested/part-one/`.
// Registered last, so the fixed routes above take precedence.
#[web::get("/{path}*")]
async fn post_view(req: HttpRequest, path: web::types::Path<String>, state: State) -> web::HttpResponse {
    let path = path.into_inner();
    let Some(post) = state.index.find_by_path(&path) else {
        return plain(web::HttpResponse::NotFound(), format!("Page /{} not found", path));
    };
    if !req.path().ends_with('/') {
        return redirect(post.link());
    }
    let (prev, next) = state.index.siblings(&post.slug).unwrap_or_default();

    let view = match state.presenter.present(post, prev, next) {
        Ok(view) => view,
        Err(e) => {
            error!("{}", e);
            return plain(web::HttpResponse::InternalServerError(), format!("Error loading post {}: {}", post.slug, e));
        }
    };

    match state.post.render(&state.site.title, post, &view) {
        Ok(rendered) => html(rendered),
        Err(e) => {
            error!("Error rendering post {}: {}", post.slug, e);
            plain(web::HttpResponse::InternalServerError(), format!("Error rendering post {}: {}", post.slug, e))
        }
    }
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: State) -> Result<NamedFile, web::Error> {
    if path.contains("..") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.public_dir.join(path.into_inner());
    Ok(NamedFile::open(file_path)?)
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home_page)
        .service(public_files)
        .service(blog_list)
        .service(blog_wo_slash)
        .service(tag_list)
        .service(tag_wo_slash)
        .service(post_view);
}

fn read_template(template_dir: &Path, name: &str) -> io::Result<String> {
    let path = template_dir.join(name);
    match fs::read_to_string(&path) {
        Ok(src) => Ok(src),
        Err(e) => Err(io::Error::new(e.kind(), format!("Error reading template {}: {}", path.display(), e))),
    }
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let content_index = ContentIndex::from_file(&config.paths.content_index)?;
    if content_index.posts().is_empty() {
        warn!("No posts in {}", config.paths.content_index.display());
    } else {
        info!("Loaded {} posts from {}", content_index.posts().len(), config.paths.content_index.display());
    }
    for post in content_index.posts() {
        info!("Post: {} -> {}", post.slug, post.link());
    }

    let template_dir = &config.paths.template_dir;
    let locale = config.site.locale.as_str();
    let home_renderer = HomeRenderer::new(read_template(template_dir, "home.tpl")?, locale)?;
    let list_renderer = ListRenderer::new(read_template(template_dir, "list.tpl")?, locale)?;
    let post_renderer = PostRenderer::new(read_template(template_dir, "post.tpl")?)?;

    let presenter = PostPresenter::new(locale, config.comments);
    if presenter.comments_enabled() {
        info!("Comments enabled");
    }

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState {
        index: content_index,
        presenter,
        home: home_renderer,
        list: list_renderer,
        post: post_renderer,
        site: config.site,
        public_dir: config.paths.public_dir,
    });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .configure(routes)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use ntex::http::{header, StatusCode};
    use ntex::web::test;

    use crate::test_data::make_post;

    use super::*;

    fn app_state() -> Arc<AppState> {
        let mut nested = make_post("nested/part-one", "2024-03-05");
        nested.path = "blog/nested/part-one".to_string();
        let flat = make_post("flat", "2024-03-01");

        Arc::new(AppState {
            index: ContentIndex::from_posts(vec![flat, nested]),
            presenter: PostPresenter::new("en-US", None),
            home: HomeRenderer::new("{{#post_list}}{{link}} {{/post_list}}".to_string(), "en-US").unwrap(),
            list: ListRenderer::new("{{heading}}".to_string(), "en-US").unwrap(),
            post: PostRenderer::new("{{post_title}}|{{#prev}}prev:{{link}}{{/prev}}|{{#next}}next:{{link}}{{/next}}".to_string()).unwrap(),
            site: Site {
                title: "Blog".to_string(),
                locale: "en-US".to_string(),
                max_display: NonZeroUsize::new(5).unwrap(),
                page_size: 10,
            },
            public_dir: PathBuf::from("res/public"),
        })
    }

    async fn read(resp: web::WebResponse) -> (StatusCode, Option<String>, String) {
        let status = resp.status();
        let content_type = resp.headers().get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = test::read_body(resp).await;
        (status, content_type, String::from_utf8_lossy(&body).to_string())
    }

    #[ntex::test]
    async fn test_post_pages_follow_their_links() {
        let app = test::init_service(web::App::new().state(app_state()).configure(routes)).await;

        let (status, _, body) = read(test::call_service(&app, test::TestRequest::with_uri("/").to_request()).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "/blog/nested/part-one/ /blog/flat/ ");

        let (status, _, body) = read(test::call_service(&app, test::TestRequest::with_uri("/blog/nested/part-one/").to_request()).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Title of nested/part-one|prev:/blog/flat/|");

        let (status, _, body) = read(test::call_service(&app, test::TestRequest::with_uri("/blog/flat/").to_request()).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Title of flat||next:/blog/nested/part-one/");

        let next = body.rsplit("next:").next().unwrap().to_string();
        let (status, _, _) = read(test::call_service(&app, test::TestRequest::with_uri(&next).to_request()).await).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[ntex::test]
    async fn test_post_without_trailing_slash_redirects() {
        let app = test::init_service(web::App::new().state(app_state()).configure(routes)).await;

        let resp = test::call_service(&app, test::TestRequest::with_uri("/blog/nested/part-one").to_request()).await;
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()), Some("/blog/nested/part-one/"));
    }

    #[ntex::test]
    async fn test_not_found_is_plain_text() {
        let app = test::init_service(web::App::new().state(app_state()).configure(routes)).await;

        let (status, content_type, body) = read(test::call_service(&app, test::TestRequest::with_uri("/blog/missing/").to_request()).await).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
        assert!(body.contains("missing"));

        let (status, content_type, _) = read(test::call_service(&app, test::TestRequest::with_uri("/tags/nothing/").to_request()).await).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
    }
}
