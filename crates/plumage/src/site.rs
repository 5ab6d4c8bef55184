use std::collections::HashMap;
use std::convert::Infallible;
use std::io;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, RwLock};

use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, Full};
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{header, Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use once_cell::sync::Lazy;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc::unbounded_channel;
use tracing::{error, info, warn};
use url::form_urlencoded;
use walkdir::WalkDir;

use crate::base_path::BasePath;
use crate::config::{Config, EmailAddress, LoadConfigError};
use crate::content::{ContentKind, ContentSet, LoadContentError};
use crate::mail::Mailer;
use crate::messages::{Endpoint, MessageKind, Messages};
use crate::render::RenderContext;
use crate::router::RegexRouter;
use crate::storage::{DiskStorage, InMemoryStorage, Store};
use crate::templates;

/// What a matched route resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    Favicon,
    Static,
    Mail,
    Status,
    Content,
    Generic,
}

#[derive(Error, Debug)]
pub enum LoadSiteError {
    #[error("failed to load config: {0}")]
    Config(#[from] LoadConfigError),

    #[error("failed to load content: {0}")]
    Content(#[from] LoadContentError),

    #[error("failed to build routing table: {0}")]
    Router(#[from] regex::Error),
}

#[derive(Error, Debug)]
pub enum RenderSiteError {
    #[error("render error: {0}")]
    RenderPage(#[from] std::fmt::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to walk static directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Error, Debug)]
pub enum ServeSiteError {
    #[error("async IO error: {0}")]
    AsyncIo(#[from] tokio::io::Error),

    #[error(transparent)]
    Load(#[from] LoadSiteError),

    #[error(transparent)]
    Render(#[from] RenderSiteError),

    #[error("failed to watch config directory: {0}")]
    Watch(#[from] notify::Error),
}

#[derive(Error, Debug)]
pub enum BuildSiteError {
    #[error(transparent)]
    Load(#[from] LoadSiteError),

    #[error(transparent)]
    Render(#[from] RenderSiteError),
}

static SITE_CONTENT: Lazy<Arc<RwLock<HashMap<String, String>>>> =
    Lazy::new(|| Arc::new(RwLock::new(HashMap::new())));

pub struct Site {
    config_dir: PathBuf,
    static_dir: PathBuf,
    output_dir: PathBuf,
    base_path: BasePath,
    config: Config,
    messages: Messages,
    mailer: Option<Mailer>,
    content: HashMap<ContentKind, ContentSet>,
    router: RegexRouter<RouteTarget>,
    is_serving: bool,
}

impl Site {
    pub fn builder() -> SiteBuilder<()> {
        SiteBuilder::new()
    }

    /// Loads the config and every enabled content kind, and rebuilds the
    /// routing table. Called again by the watcher whenever a config file
    /// changes while serving.
    pub fn load(&mut self) -> Result<(), LoadSiteError> {
        let config = Config::load(&self.config_dir)?;

        let mut content = HashMap::new();
        for kind in &config.profile.content_kinds {
            content.insert(*kind, ContentSet::load(*kind, &self.config_dir)?);
        }

        self.messages = Messages::compile(config.profile.email.as_ref());

        self.mailer = match (&config.smtp, &config.profile.email) {
            (Some(smtp), Some(email)) if config.render_contact => {
                match Mailer::new(smtp, email.clone()) {
                    Ok(mailer) => Some(mailer),
                    Err(err) => {
                        warn!("failed to set up mailer, contact form disabled: {err}");
                        None
                    }
                }
            }
            _ => None,
        };

        self.config = config;
        if self.mailer.is_none() {
            self.config.render_contact = false;
        }
        self.content = content;
        self.router = self.build_router()?;

        Ok(())
    }

    fn build_router(&self) -> Result<RegexRouter<RouteTarget>, regex::Error> {
        let mut router = RegexRouter::new(self.base_path.clone());

        router.add("^/favicon\\.ico$", RouteTarget::Favicon)?;
        router.add("^/static/", RouteTarget::Static)?;
        router.add("^/mail$", RouteTarget::Mail)?;
        router.add(Endpoint::routing_pattern(), RouteTarget::Status)?;
        if !self.config.profile.content_kinds.is_empty() {
            router.add(
                &ContentKind::routing_pattern(&self.config.profile.content_kinds),
                RouteTarget::Content,
            )?;
        }
        router.add(".*", RouteTarget::Generic)?;

        Ok(router)
    }

    fn render_context(&self) -> RenderContext<'_> {
        RenderContext {
            profile: &self.config.profile,
            base_path: &self.base_path,
            // A static build has no server to POST the form to.
            render_contact: self.is_serving && self.config.render_contact,
        }
    }

    pub fn render(&self) -> Result<(), RenderSiteError> {
        if self.is_serving {
            // Render into a fresh map and swap it in: pages for kinds a
            // reload disabled must not survive.
            let staged = Arc::new(RwLock::new(HashMap::new()));
            self.render_to(InMemoryStorage::new(staged.clone()))?;

            let staged = std::mem::take(
                &mut *staged
                    .write()
                    .map_err(|_| RenderSiteError::Storage("poisoned".to_string()))?,
            );
            *SITE_CONTENT
                .write()
                .map_err(|_| RenderSiteError::Storage("poisoned".to_string()))? = staged;

            Ok(())
        } else {
            self.render_to(DiskStorage::new(self.output_dir.clone()))
        }
    }

    fn render_to(&self, storage: impl Store) -> Result<(), RenderSiteError> {
        let ctx = self.render_context();

        let store_page = |route: &str, html: String| {
            storage
                .store_page(route, html)
                .map_err(|err| RenderSiteError::Storage(err.to_string()))
        };

        store_page("/", templates::page(&ctx, "Home", templates::index(&ctx))?)?;

        for kind in &self.config.profile.content_kinds {
            let Some(set) = self.content.get(kind) else {
                continue;
            };

            store_page(
                &format!("/{kind}"),
                templates::page(&ctx, kind.title(), templates::content(&ctx, set))?,
            )?;
        }

        if ctx.render_contact {
            store_page(
                "/contact",
                templates::page(&ctx, "Contact", templates::contact(&ctx))?,
            )?;
        }

        if !self.is_serving {
            let not_found = self.messages.get(Endpoint::Fail, MessageKind::NotFound);
            store_page(
                &format!("/{}", not_found.status.as_u16()),
                templates::page(
                    &ctx,
                    not_found.title,
                    templates::status(&ctx, not_found),
                )?,
            )?;

            self.copy_static_assets(&storage)?;
        }

        Ok(())
    }

    fn copy_static_assets(&self, storage: &impl Store) -> Result<(), RenderSiteError> {
        if !self.static_dir.is_dir() {
            warn!(path = %self.static_dir.display(), "static directory not found, skipping assets");
            return Ok(());
        }

        for entry in WalkDir::new(&self.static_dir).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative_path = entry
                .path()
                .strip_prefix(&self.static_dir)
                .expect("walked path is under the static dir");

            let contents = std::fs::read(entry.path())?;
            storage
                .store_asset(relative_path, contents)
                .map_err(|err| RenderSiteError::Storage(err.to_string()))?;
        }

        Ok(())
    }

    /// Pre-renders the whole site into the output directory.
    pub fn build(&mut self) -> Result<(), BuildSiteError> {
        self.is_serving = false;
        self.load()?;
        self.render()?;

        info!(output = %self.output_dir.display(), "static site built");

        Ok(())
    }

    /// Serves the site dynamically, re-rendering whenever a config file
    /// changes.
    pub async fn serve(mut self, addr: SocketAddr) -> Result<(), ServeSiteError> {
        self.is_serving = true;
        self.load()?;
        self.render()?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "listening");

        let site = Arc::new(RwLock::new(self));

        let (watcher_tx, mut watcher_rx) = unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                if let Ok(event) = result {
                    watcher_tx.send(event).ok();
                }
            },
            notify::Config::default(),
        )?;

        watcher.watch(
            &site.read().unwrap().config_dir,
            RecursiveMode::Recursive,
        )?;

        let watched_site = site.clone();
        tokio::task::spawn(async move {
            use notify::EventKind;

            while let Some(event) = watcher_rx.recv().await {
                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {
                        info!(paths = ?event.paths, "config changed, reloading");

                        let mut site = watched_site.write().unwrap();
                        if let Err(err) = site.load() {
                            error!("reload failed, keeping previous content: {err}");
                            continue;
                        }
                        if let Err(err) = site.render() {
                            error!("re-render failed, keeping previous content: {err}");
                        }
                    }
                    _ => {}
                }
            }
        });

        loop {
            let (stream, _) = listener.accept().await?;

            let io = TokioIo::new(stream);
            let site = site.clone();

            tokio::task::spawn(async move {
                if let Err(err) = http1::Builder::new()
                    .serve_connection(
                        io,
                        service_fn(move |req| handle_request(req, site.clone())),
                    )
                    .await
                {
                    error!("error serving connection: {err:?}");
                }
            });
        }
    }
}

fn empty() -> BoxBody<Bytes, hyper::Error> {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed()
}

fn full<T: Into<Bytes>>(chunk: T) -> BoxBody<Bytes, hyper::Error> {
    Full::new(chunk.into())
        .map_err(|never| match never {})
        .boxed()
}

type HandlerResponse = Response<BoxBody<Bytes, hyper::Error>>;

fn html_response(status: StatusCode, html: String) -> HandlerResponse {
    Response::builder()
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .status(status)
        .body(full(html))
        .expect("static parts of the response are valid")
}

fn status_response(status: StatusCode) -> HandlerResponse {
    let mut response = Response::new(empty());
    *response.status_mut() = status;
    response
}

/// Redirects to a status page. 303 See Other clears the form so a refresh
/// does not trigger another send.
fn redirect_to_status(
    base_path: &BasePath,
    endpoint: Endpoint,
    kind: MessageKind,
) -> HandlerResponse {
    let location = base_path.join(&format!(
        "/{}?kind={}",
        endpoint.as_str(),
        kind.as_str()
    ));

    Response::builder()
        .header(header::LOCATION, location)
        .status(StatusCode::SEE_OTHER)
        .body(empty())
        .expect("static parts of the response are valid")
}

fn redirect_to(location: String) -> HandlerResponse {
    Response::builder()
        .header(header::LOCATION, location)
        .status(StatusCode::SEE_OTHER)
        .body(empty())
        .expect("static parts of the response are valid")
}

async fn handle_request(
    req: Request<hyper::body::Incoming>,
    site: Arc<RwLock<Site>>,
) -> Result<HandlerResponse, Infallible> {
    let path = req.uri().path().to_string();

    let (target, site_path, base_path) = {
        let site = site.read().unwrap();
        match site.router.recognize(&path) {
            Some(recognized) => (
                *recognized.target,
                recognized.path,
                site.base_path.clone(),
            ),
            None => {
                return Ok(redirect_to_status(
                    &site.base_path,
                    Endpoint::Fail,
                    MessageKind::NotFound,
                ))
            }
        }
    };

    let response = match target {
        RouteTarget::Favicon => serve_static_file(&site, Path::new("favicon.ico")).await,
        RouteTarget::Static => {
            let relative = site_path.trim_start_matches("/static/");
            match safe_relative_path(relative) {
                Some(relative) => serve_static_file(&site, &relative).await,
                None => status_response(StatusCode::NOT_FOUND),
            }
        }
        RouteTarget::Mail => handle_mail(req, &site, &base_path).await,
        RouteTarget::Status => {
            let kind = query_param(req.uri().query(), "kind").unwrap_or_default();
            let endpoint = site_path.trim_start_matches('/');
            render_status_page(&site, endpoint, &kind)
        }
        RouteTarget::Content | RouteTarget::Generic => {
            if req.method() != Method::GET {
                return Ok(status_response(StatusCode::METHOD_NOT_ALLOWED));
            }

            match SITE_CONTENT.read().unwrap().get(&site_path) {
                Some(content) => html_response(StatusCode::OK, content.clone()),
                None => redirect_to_status(&base_path, Endpoint::Fail, MessageKind::NotFound),
            }
        }
    };

    Ok(response)
}

/// Rejects traversal outside the static dir.
fn safe_relative_path(path: &str) -> Option<PathBuf> {
    let path = Path::new(path);

    if path
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        Some(path.to_owned())
    } else {
        None
    }
}

async fn serve_static_file(site: &Arc<RwLock<Site>>, relative: &Path) -> HandlerResponse {
    let file_path = site.read().unwrap().static_dir.join(relative);

    match tokio::fs::read(&file_path).await {
        Ok(contents) => {
            let mime = mime_guess::from_path(&file_path).first_or_octet_stream();

            Response::builder()
                .header(header::CONTENT_TYPE, mime.as_ref())
                .status(StatusCode::OK)
                .body(full(contents))
                .expect("static parts of the response are valid")
        }
        Err(_) => status_response(StatusCode::NOT_FOUND),
    }
}

fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn render_status_page(site: &Arc<RwLock<Site>>, endpoint: &str, kind: &str) -> HandlerResponse {
    let site = site.read().unwrap();
    let message = site.messages.lookup(endpoint, kind);
    let ctx = site.render_context();

    match templates::page(&ctx, message.title, templates::status(&ctx, message)) {
        Ok(html) => html_response(message.status, html),
        Err(err) => {
            // Redirecting here would loop straight back to this page.
            error!("failed to render status page: {err}");
            status_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn handle_mail<B>(
    req: Request<B>,
    site: &Arc<RwLock<Site>>,
    base_path: &BasePath,
) -> HandlerResponse
where
    B: hyper::body::Body,
    B::Error: std::fmt::Display,
{
    if req.method() != Method::POST {
        return redirect_to(base_path.join("/contact"));
    }

    let Some(mailer) = site.read().unwrap().mailer.clone() else {
        return redirect_to_status(base_path, Endpoint::Fail, MessageKind::NotFound);
    };

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            error!("could not read contact form body: {err}");
            return redirect_to_status(base_path, Endpoint::Fail, MessageKind::Contact);
        }
    };

    let mut name = String::new();
    let mut email = String::new();
    let mut message = String::new();

    for (key, value) in form_urlencoded::parse(&body) {
        match key.as_ref() {
            "name" => name = value.into_owned(),
            "email" => email = value.into_owned(),
            "message" => message = value.into_owned(),
            _ => {}
        }
    }

    // Keep submitted text out of the mail headers.
    let name = name.replace(['\r', '\n'], " ").trim().to_string();

    let reply_to: EmailAddress = match email.parse() {
        Ok(address) => address,
        Err(_) => {
            warn!("received invalid email address for contact form, will not send mail");
            return redirect_to_status(base_path, Endpoint::Fail, MessageKind::Address);
        }
    };

    let send_result =
        tokio::task::spawn_blocking(move || mailer.send_contact(&reply_to, &name, &message))
            .await;

    match send_result {
        Ok(Ok(())) => redirect_to_status(base_path, Endpoint::Success, MessageKind::Contact),
        Ok(Err(err)) => {
            error!("could not send email: {err}");
            redirect_to_status(base_path, Endpoint::Fail, MessageKind::Contact)
        }
        Err(err) => {
            error!("mail task failed: {err}");
            redirect_to_status(base_path, Endpoint::Fail, MessageKind::Contact)
        }
    }
}

pub struct SiteBuilder<T> {
    state: T,
}

impl SiteBuilder<()> {
    pub fn new() -> Self {
        Self { state: () }
    }

    pub fn config_dir(self, config_dir: impl AsRef<Path>) -> SiteBuilder<WithConfigDir> {
        SiteBuilder {
            state: WithConfigDir {
                config_dir: config_dir.as_ref().to_owned(),
                static_dir: PathBuf::from("static"),
                output_dir: PathBuf::from("dist"),
                base_path: BasePath::default(),
            },
        }
    }
}

impl Default for SiteBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct WithConfigDir {
    config_dir: PathBuf,
    static_dir: PathBuf,
    output_dir: PathBuf,
    base_path: BasePath,
}

impl SiteBuilder<WithConfigDir> {
    pub fn static_dir(mut self, static_dir: impl AsRef<Path>) -> Self {
        self.state.static_dir = static_dir.as_ref().to_owned();
        self
    }

    pub fn output_dir(mut self, output_dir: impl AsRef<Path>) -> Self {
        self.state.output_dir = output_dir.as_ref().to_owned();
        self
    }

    pub fn base_path(mut self, base_path: &str) -> Self {
        self.state.base_path = BasePath::new(base_path);
        self
    }

    pub fn build(self) -> Site {
        let base_path = self.state.base_path;

        Site {
            config_dir: self.state.config_dir,
            static_dir: self.state.static_dir,
            output_dir: self.state.output_dir,
            base_path: base_path.clone(),
            config: Config {
                profile: Default::default(),
                smtp: None,
                render_contact: false,
            },
            messages: Messages::compile(None),
            mailer: None,
            content: HashMap::new(),
            router: RegexRouter::new(base_path),
            is_serving: false,
        }
    }
}
