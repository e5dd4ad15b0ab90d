use std::sync::Arc;

use crate::{
    db::{DbPool, OrmConn, orm_from_pool},
    middleware::auth::JwtKeys,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub jwt: Arc<JwtKeys>,
}

impl AppState {
    pub fn new(pool: DbPool, jwt: JwtKeys) -> Self {
        let orm = orm_from_pool(&pool);
        Self {
            pool,
            orm,
            jwt: Arc::new(jwt),
        }
    }
}
