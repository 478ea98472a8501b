//! 速率限制中间件
//!
//! 固定窗口计数，计数存放在进程内的 moka 缓存中（多实例部署时各自计数）。
//! 已登录请求按账号计数，否则按客户端 IP；挂在单个路由上：
//!
//! ```rust,ignore
//! .route("/login", web::post().to(login).wrap(RateLimit::login()))
//! ```
//!
//! 放行的响应带 `X-RateLimit-Limit` 与 `X-RateLimit-Remaining`，
//! 超限返回 429 并带 `Retry-After`。

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{
        StatusCode,
        header::{HeaderName, HeaderValue, RETRY_AFTER},
    },
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::{IpAddr, SocketAddr};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use super::RequireJWT;
use super::create_error_response;
use crate::models::ErrorCode;

static COUNTERS: Lazy<Cache<String, Window>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

const LIMIT_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const REMAINING_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    started: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Allow { remaining: u32 },
    Deny { retry_after: u64 },
}

#[derive(Clone)]
pub struct RateLimit {
    bucket: &'static str,
    max_requests: u32,
    window: Duration,
}

impl RateLimit {
    pub fn new(bucket: &'static str, max_requests: u32, window_secs: u64) -> Self {
        Self {
            bucket,
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    /// 5 次/分钟
    pub fn login() -> Self {
        Self::new("login", 5, 60)
    }

    /// 10 次/分钟
    pub fn refresh_token() -> Self {
        Self::new("refresh", 10, 60)
    }

    /// 学生批量导入，5 次/分钟
    pub fn import() -> Self {
        Self::new("import", 5, 60)
    }

    /// 报表导出，20 次/分钟
    pub fn export() -> Self {
        Self::new("export", 20, 60)
    }

    /// 推进计数窗口，返回新的窗口状态与判定结果
    fn advance(&self, previous: Option<Window>, now: Instant) -> (Window, Verdict) {
        let current = match previous {
            Some(w) if now.duration_since(w.started) < self.window => w,
            _ => Window {
                count: 0,
                started: now,
            },
        };

        if current.count >= self.max_requests {
            let retry_after = self
                .window
                .saturating_sub(now.duration_since(current.started))
                .as_secs()
                .max(1);
            return (current, Verdict::Deny { retry_after });
        }

        let next = Window {
            count: current.count + 1,
            ..current
        };
        let remaining = self.max_requests - next.count;
        (next, Verdict::Allow { remaining })
    }
}

/// 限流身份：已登录按账号，否则取 actix 解析出的客户端地址（已考虑 Forwarded / X-Forwarded-For）
fn client_key(req: &ServiceRequest) -> String {
    if let Some(user_id) = RequireJWT::extract_user_id(req.request()) {
        return format!("user:{user_id}");
    }
    let ip = req
        .connection_info()
        .realip_remote_addr()
        .and_then(parse_ip)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    format!("ip:{ip}")
}

/// 无代理头时取到的是对端 `ip:port`
fn parse_ip(addr: &str) -> Option<IpAddr> {
    addr.parse::<SocketAddr>()
        .map(|socket| socket.ip())
        .or_else(|_| addr.parse::<IpAddr>())
        .ok()
}

fn too_many_requests(retry_after: u64) -> HttpResponse {
    let mut res = create_error_response(
        StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::RateLimitExceeded,
        "请求过于频繁，请稍后再试",
    );
    res.headers_mut()
        .insert(RETRY_AFTER, HeaderValue::from(retry_after));
    res.headers_mut()
        .insert(REMAINING_HEADER, HeaderValue::from_static("0"));
    res
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let key = format!("{}:{}", limit.bucket, client_key(&req));
            let previous = COUNTERS.get(&key).await;
            let (window, verdict) = limit.advance(previous, Instant::now());
            COUNTERS.insert(key.clone(), window).await;

            match verdict {
                Verdict::Deny { retry_after } => {
                    warn!("Rate limit hit for {} ({} requests)", key, window.count);
                    Ok(req.into_response(too_many_requests(retry_after).map_into_right_body()))
                }
                Verdict::Allow { remaining } => {
                    let mut res = srv.call(req).await?;
                    let headers = res.headers_mut();
                    headers.insert(LIMIT_HEADER, HeaderValue::from(limit.max_requests));
                    headers.insert(REMAINING_HEADER, HeaderValue::from(remaining));
                    Ok(res.map_into_left_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(RateLimit::login().max_requests, 5);
        assert_eq!(RateLimit::import().bucket, "import");
        assert_eq!(RateLimit::export().max_requests, 20);
        assert_eq!(RateLimit::refresh_token().window, Duration::from_secs(60));
    }

    #[test]
    fn test_parse_ip_strips_port() {
        assert_eq!(parse_ip("10.0.0.7:51234"), "10.0.0.7".parse().ok());
        assert_eq!(parse_ip("[::1]:8080"), "::1".parse().ok());
        assert_eq!(parse_ip("203.0.113.9"), "203.0.113.9".parse().ok());
        assert_eq!(parse_ip("not-an-ip"), None);
    }

    #[test]
    fn test_window_blocks_then_resets() {
        let limit = RateLimit::new("test", 3, 60);
        let start = Instant::now();

        let mut state = None;
        for expected_remaining in [2, 1, 0] {
            let (window, verdict) = limit.advance(state, start);
            assert_eq!(
                verdict,
                Verdict::Allow {
                    remaining: expected_remaining
                }
            );
            state = Some(window);
        }

        let (_, verdict) = limit.advance(state, start + Duration::from_secs(10));
        assert_eq!(verdict, Verdict::Deny { retry_after: 50 });

        let (window, verdict) = limit.advance(state, start + Duration::from_secs(61));
        assert_eq!(verdict, Verdict::Allow { remaining: 2 });
        assert_eq!(window.count, 1);
    }
}
