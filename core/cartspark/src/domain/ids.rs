//! 識別子の Newtype
//!
//! ID はストアのファイル名にもなるため、英数字と `-` `_` だけを受け付ける。

use serde::{Deserialize, Serialize};

fn is_safe_key(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 128
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

macro_rules! key_newtype {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// 検証して作る。使えない文字を含むなら None。
            pub fn parse(s: &str) -> Option<Self> {
                let s = s.trim();
                is_safe_key(s).then(|| Self(s.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub(crate) const WHAT: &'static str = $what;
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<common::domain::DocId> for $name {
            fn from(id: common::domain::DocId) -> Self {
                Self(id.into())
            }
        }
    };
}

key_newtype!(
    /// プリンシパル（ログインユーザー）の ID
    Uid,
    "user id"
);
key_newtype!(
    /// リスト文書の ID
    ListId,
    "list id"
);
key_newtype!(
    /// 食事テンプレートの ID
    MealId,
    "meal id"
);

/// メールアドレス（小文字に正規化）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// `@` を 1 つ含み、空白やパス区切りを含まないものだけを受け付ける
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let valid = s.matches('@').count() == 1
            && !s.starts_with('@')
            && !s.ends_with('@')
            && !s.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\')
            && !s.starts_with('.');
        valid.then_some(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// 認証済みのプリンシパル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub uid: Uid,
    pub email: Option<Email>,
}
