use std::sync::Arc;

use tokio::sync::RwLock;

use crate::identity::Identity;

/// Looks up a cookie by name in a raw `Cookie` request header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k.trim() == name {
            Some(v.trim())
        } else {
            None
        }
    })
}

#[derive(Default)]
struct Inner {
    directives: RwLock<Vec<Arc<str>>>,
}

/// Per-request buffer of outgoing `set-cookie` directives. Append-only
/// while the request executes, drained once afterwards.
#[derive(Default, Clone)]
pub struct ResponseCookies {
    inner: Arc<Inner>,
}

impl ResponseCookies {
    pub async fn push(&self, directive: impl Into<Arc<str>>) {
        self.inner.directives.write().await.push(directive.into());
    }

    pub async fn drain(&self) -> Vec<Arc<str>> {
        std::mem::take(&mut *self.inner.directives.write().await)
    }
}

/// Request-scoped session context: the identity resolved from the inbound
/// cookie (at most one per request) and the outgoing cookie buffer.
#[derive(Default, Clone)]
pub struct Session {
    identity: Option<Identity>,
    cookies: ResponseCookies,
}

impl Session {
    pub fn new(identity: Option<Identity>) -> Self {
        Self {
            identity,
            cookies: ResponseCookies::default(),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn cookies(&self) -> &ResponseCookies {
        &self.cookies
    }
}

#[cfg(test)]
mod tests {
    use super::{cookie_value, ResponseCookies};

    #[test]
    fn cookie_value_test() {
        let header = "theme=dark; auth-token=abc.def.ghi; lang=en";
        assert_eq!(cookie_value(header, "auth-token"), Some("abc.def.ghi"));
        assert_eq!(cookie_value(header, "theme"), Some("dark"));
        assert_eq!(cookie_value(header, "missing"), None);
        assert_eq!(cookie_value("", "auth-token"), None);
        assert_eq!(cookie_value("auth-token", "auth-token"), None);
    }

    #[tokio::test]
    async fn drain_preserves_emission_order_test() {
        let cookies = ResponseCookies::default();
        cookies.push("a=1; Max-Age=0").await;
        cookies.push("b=2; Max-Age=604800").await;
        let drained = cookies.drain().await;
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].as_ref(), "a=1; Max-Age=0");
        assert_eq!(drained[1].as_ref(), "b=2; Max-Age=604800");
        assert!(cookies.drain().await.is_empty());
    }
}
