use kit::Router;

use crate::controllers;
use crate::store::UserStore;

/// The users API with a fresh, empty store
pub fn router() -> Router {
    Router::new()
        .with_state(UserStore::new())
        .post("/users", controllers::user::store)
        .name("users.store")
        .get("/users", controllers::user::index)
        .name("users.index")
        .get("/users/{id}", controllers::user::show)
        .name("users.show")
        .put("/users/{id}", controllers::user::update)
        .name("users.update")
        .delete("/users/{id}", controllers::user::destroy)
        .name("users.destroy")
}
