//! ユーザー文書とメール索引のストア Outbound ポート

use crate::domain::{Email, Uid, UserRecord};
use common::error::Error;

pub trait UserRepository: Send + Sync {
    fn get(&self, uid: &Uid) -> Result<Option<UserRecord>, Error>;
    fn save(&self, uid: &Uid, record: &UserRecord) -> Result<(), Error>;

    /// メールアドレス → uid の索引
    fn uid_for_email(&self, email: &Email) -> Result<Option<Uid>, Error>;
    fn index_email(&self, email: &Email, uid: &Uid) -> Result<(), Error>;
}
