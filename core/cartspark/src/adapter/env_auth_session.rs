//! 環境変数からプリンシパルを解決する AuthSession
//!
//! CARTSPARK_UID が無ければゲスト。CARTSPARK_EMAIL は任意。

use crate::domain::{Email, Principal, Uid};
use crate::ports::outbound::AuthSession;
use common::ports::outbound::EnvResolver;
use std::sync::Arc;

pub const UID_ENV: &str = "CARTSPARK_UID";
pub const EMAIL_ENV: &str = "CARTSPARK_EMAIL";

pub struct EnvAuthSession {
    env: Arc<dyn EnvResolver>,
}

impl EnvAuthSession {
    pub fn new(env: Arc<dyn EnvResolver>) -> Self {
        Self { env }
    }
}

impl AuthSession for EnvAuthSession {
    fn current(&self) -> Option<Principal> {
        let uid = self.env.var(UID_ENV).and_then(|s| Uid::parse(&s))?;
        let email = self.env.var(EMAIL_ENV).and_then(|s| Email::parse(&s));
        Some(Principal { uid, email })
    }
}
