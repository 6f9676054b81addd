//! Application state and the reducer that advances it. Every dispatch goes
//! through [`Store`], which is the only place persistence happens: the
//! reducer reports which collections it touched and the store writes
//! exactly those.

use serde::{Deserialize, Serialize};

use crate::errors::ClientError;
use crate::pages::{resolve_navigation, Page};
use crate::persist::Persister;
use ::service::sync::SyncSnapshot;
use models::{booking, course, enrollment, gallery, order, product, service, settings, user};

/// A persisted collection. `key()` names its document in the persister.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    Services,
    Products,
    Courses,
    Bookings,
    Enrollments,
    Gallery,
    Orders,
    Settings,
    Cart,
    Session,
}

impl Collection {
    pub fn key(self) -> &'static str {
        match self {
            Collection::Services => "services",
            Collection::Products => "products",
            Collection::Courses => "courses",
            Collection::Bookings => "bookings",
            Collection::Enrollments => "enrollments",
            Collection::Gallery => "gallery",
            Collection::Orders => "orders",
            Collection::Settings => "settings",
            Collection::Cart => "cart",
            Collection::Session => "session",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: i32,
    pub quantity: u32,
}

/// Token plus the signed-in account, persisted together.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: user::PublicDto,
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub services: Vec<service::Dto>,
    pub products: Vec<product::Dto>,
    pub courses: Vec<course::Dto>,
    pub bookings: Vec<booking::Dto>,
    pub enrollments: Vec<enrollment::Dto>,
    pub gallery: Vec<gallery::Dto>,
    pub orders: Vec<order::Dto>,
    pub settings: Option<settings::Dto>,
    pub cart: Vec<CartItem>,
    pub session: Option<Session>,
    pub page: Page,
}

#[derive(Clone, Debug)]
pub enum Action {
    Navigate(Page),
    LogIn(Session),
    LogOut,

    SetServices(Vec<service::Dto>),
    UpsertService(service::Dto),
    RemoveService(i32),

    SetProducts(Vec<product::Dto>),
    UpsertProduct(product::Dto),
    RemoveProduct(i32),

    SetCourses(Vec<course::Dto>),
    UpsertCourse(course::Dto),
    RemoveCourse(i32),

    SetBookings(Vec<booking::Dto>),
    UpsertBooking(booking::Dto),
    RemoveBooking(i32),

    SetEnrollments(Vec<enrollment::Dto>),
    UpsertEnrollment(enrollment::Dto),
    RemoveEnrollment(i32),

    SetGallery(Vec<gallery::Dto>),
    UpsertGalleryItem(gallery::Dto),
    RemoveGalleryItem(i32),

    SetOrders(Vec<order::Dto>),
    UpsertOrder(order::Dto),

    SetSettings(settings::Dto),

    AddToCart(i32),
    SetCartQuantity(i32, u32),
    RemoveFromCart(i32),
    ClearCart,

    /// A pull from the server; replaces every collection it carries.
    ApplySnapshot(SyncSnapshot),
}

fn upsert_by<T>(items: &mut Vec<T>, item: T, same: impl Fn(&T, &T) -> bool) {
    match items.iter_mut().find(|existing| same(existing, &item)) {
        Some(existing) => *existing = item,
        None => items.insert(0, item),
    }
}

/// Applies an action and reports which collections changed.
pub fn reduce(state: &mut AppState, action: Action) -> Vec<Collection> {
    use Collection as C;
    match action {
        Action::Navigate(target) => {
            state.page = resolve_navigation(target, state.session.as_ref().map(|s| &s.user));
            vec![]
        }
        Action::LogIn(session) => {
            state.session = Some(session);
            vec![C::Session]
        }
        Action::LogOut => {
            state.session = None;
            state.page = Page::Home;
            vec![C::Session]
        }

        Action::SetServices(items) => {
            state.services = items;
            vec![C::Services]
        }
        Action::UpsertService(item) => {
            upsert_by(&mut state.services, item, |a, b| a.id == b.id);
            vec![C::Services]
        }
        Action::RemoveService(id) => {
            state.services.retain(|s| s.id != id);
            vec![C::Services]
        }

        Action::SetProducts(items) => {
            state.products = items;
            vec![C::Products]
        }
        Action::UpsertProduct(item) => {
            upsert_by(&mut state.products, item, |a, b| a.id == b.id);
            vec![C::Products]
        }
        Action::RemoveProduct(id) => {
            state.products.retain(|p| p.id != id);
            // Dropping a product also drops it from the cart
            let before = state.cart.len();
            state.cart.retain(|c| c.product_id != id);
            if state.cart.len() != before {
                vec![C::Products, C::Cart]
            } else {
                vec![C::Products]
            }
        }

        Action::SetCourses(items) => {
            state.courses = items;
            vec![C::Courses]
        }
        Action::UpsertCourse(item) => {
            upsert_by(&mut state.courses, item, |a, b| a.id == b.id);
            vec![C::Courses]
        }
        Action::RemoveCourse(id) => {
            state.courses.retain(|c| c.id != id);
            vec![C::Courses]
        }

        Action::SetBookings(items) => {
            state.bookings = items;
            vec![C::Bookings]
        }
        Action::UpsertBooking(item) => {
            upsert_by(&mut state.bookings, item, |a, b| a.id == b.id);
            vec![C::Bookings]
        }
        Action::RemoveBooking(id) => {
            state.bookings.retain(|b| b.id != id);
            vec![C::Bookings]
        }

        Action::SetEnrollments(items) => {
            state.enrollments = items;
            vec![C::Enrollments]
        }
        Action::UpsertEnrollment(item) => {
            upsert_by(&mut state.enrollments, item, |a, b| a.id == b.id);
            vec![C::Enrollments]
        }
        Action::RemoveEnrollment(id) => {
            state.enrollments.retain(|e| e.id != id);
            vec![C::Enrollments]
        }

        Action::SetGallery(items) => {
            state.gallery = items;
            vec![C::Gallery]
        }
        Action::UpsertGalleryItem(item) => {
            upsert_by(&mut state.gallery, item, |a, b| a.id == b.id);
            vec![C::Gallery]
        }
        Action::RemoveGalleryItem(id) => {
            state.gallery.retain(|g| g.id != id);
            vec![C::Gallery]
        }

        Action::SetOrders(items) => {
            state.orders = items;
            vec![C::Orders]
        }
        Action::UpsertOrder(item) => {
            upsert_by(&mut state.orders, item, |a, b| a.id == b.id);
            vec![C::Orders]
        }

        Action::SetSettings(settings) => {
            state.settings = Some(settings);
            vec![C::Settings]
        }

        Action::AddToCart(product_id) => {
            match state.cart.iter_mut().find(|c| c.product_id == product_id) {
                Some(item) => item.quantity += 1,
                None => state.cart.push(CartItem { product_id, quantity: 1 }),
            }
            vec![C::Cart]
        }
        Action::SetCartQuantity(product_id, quantity) => {
            if quantity == 0 {
                state.cart.retain(|c| c.product_id != product_id);
            } else if let Some(item) = state.cart.iter_mut().find(|c| c.product_id == product_id)
            {
                item.quantity = quantity;
            }
            vec![C::Cart]
        }
        Action::RemoveFromCart(product_id) => {
            state.cart.retain(|c| c.product_id != product_id);
            vec![C::Cart]
        }
        Action::ClearCart => {
            state.cart.clear();
            vec![C::Cart]
        }

        Action::ApplySnapshot(snapshot) => {
            let mut touched = Vec::new();
            if let Some(items) = snapshot.services {
                state.services = items;
                touched.push(C::Services);
            }
            if let Some(items) = snapshot.products {
                state.products = items;
                touched.push(C::Products);
            }
            if let Some(items) = snapshot.courses {
                state.courses = items;
                touched.push(C::Courses);
            }
            if let Some(items) = snapshot.bookings {
                state.bookings = items;
                touched.push(C::Bookings);
            }
            if let Some(items) = snapshot.enrollments {
                state.enrollments = items;
                touched.push(C::Enrollments);
            }
            if let Some(items) = snapshot.gallery {
                state.gallery = items;
                touched.push(C::Gallery);
            }
            if let Some(items) = snapshot.orders {
                state.orders = items;
                touched.push(C::Orders);
            }
            if let Some(s) = snapshot.settings {
                state.settings = Some(s);
                touched.push(C::Settings);
            }
            touched
        }
    }
}

/// State plus persistence. Reducers stay pure; only `dispatch` writes.
pub struct Store<P: Persister> {
    state: AppState,
    persister: P,
}

impl<P: Persister> Store<P> {
    /// Hydrates state from whatever the persister already holds.
    pub fn load(persister: P) -> Result<Self, ClientError> {
        let mut state = AppState::default();
        if let Some(v) = persister.load(Collection::Services.key())? {
            state.services = serde_json::from_value(v)?;
        }
        if let Some(v) = persister.load(Collection::Products.key())? {
            state.products = serde_json::from_value(v)?;
        }
        if let Some(v) = persister.load(Collection::Courses.key())? {
            state.courses = serde_json::from_value(v)?;
        }
        if let Some(v) = persister.load(Collection::Bookings.key())? {
            state.bookings = serde_json::from_value(v)?;
        }
        if let Some(v) = persister.load(Collection::Enrollments.key())? {
            state.enrollments = serde_json::from_value(v)?;
        }
        if let Some(v) = persister.load(Collection::Gallery.key())? {
            state.gallery = serde_json::from_value(v)?;
        }
        if let Some(v) = persister.load(Collection::Orders.key())? {
            state.orders = serde_json::from_value(v)?;
        }
        if let Some(v) = persister.load(Collection::Settings.key())? {
            state.settings = Some(serde_json::from_value(v)?);
        }
        if let Some(v) = persister.load(Collection::Cart.key())? {
            state.cart = serde_json::from_value(v)?;
        }
        if let Some(v) = persister.load(Collection::Session.key())? {
            state.session = Some(serde_json::from_value(v)?);
        }
        Ok(Self { state, persister })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> Result<(), ClientError> {
        for collection in reduce(&mut self.state, action) {
            self.persist(collection)?;
        }
        Ok(())
    }

    fn persist(&self, collection: Collection) -> Result<(), ClientError> {
        use Collection as C;
        let key = collection.key();
        let value = match collection {
            C::Services => serde_json::to_value(&self.state.services)?,
            C::Products => serde_json::to_value(&self.state.products)?,
            C::Courses => serde_json::to_value(&self.state.courses)?,
            C::Bookings => serde_json::to_value(&self.state.bookings)?,
            C::Enrollments => serde_json::to_value(&self.state.enrollments)?,
            C::Gallery => serde_json::to_value(&self.state.gallery)?,
            C::Orders => serde_json::to_value(&self.state.orders)?,
            C::Cart => serde_json::to_value(&self.state.cart)?,
            C::Settings => match &self.state.settings {
                Some(s) => serde_json::to_value(s)?,
                None => return self.persister.remove(key),
            },
            C::Session => match &self.state.session {
                Some(s) => serde_json::to_value(s)?,
                None => return self.persister.remove(key),
            },
        };
        self.persister.save(key, &value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryPersister;
    use models::user::{PublicDto, ROLE_SUPER_ADMIN};

    fn svc(id: i32, name: &str) -> service::Dto {
        service::Dto {
            id,
            category: "Hair".into(),
            name: name.into(),
            description: "".into(),
            duration: 60,
            price: 50.0,
            image_url: "".into(),
            alt_text: "".into(),
        }
    }

    fn session(role: &str) -> Session {
        Session {
            token: "t".into(),
            user: PublicDto {
                id: 1,
                name: "A".into(),
                email: "a@b.c".into(),
                username: "a".into(),
                role: role.into(),
                avatar_url: "".into(),
            },
        }
    }

    #[test]
    fn dispatch_persists_only_touched_collections() {
        let mut store = Store::load(MemoryPersister::default()).unwrap();
        store.dispatch(Action::UpsertService(svc(1, "Cut"))).unwrap();
        assert_eq!(store.persister.keys(), vec!["services"]);

        store.dispatch(Action::AddToCart(9)).unwrap();
        assert_eq!(store.persister.keys(), vec!["cart", "services"]);
    }

    #[test]
    fn upsert_replaces_by_id() {
        let mut store = Store::load(MemoryPersister::default()).unwrap();
        store.dispatch(Action::UpsertService(svc(1, "Cut"))).unwrap();
        store.dispatch(Action::UpsertService(svc(1, "Precision Cut"))).unwrap();
        assert_eq!(store.state().services.len(), 1);
        assert_eq!(store.state().services[0].name, "Precision Cut");
    }

    #[test]
    fn state_survives_a_reload() {
        let persister = MemoryPersister::default();
        {
            let mut store = Store::load(persister).unwrap();
            store.dispatch(Action::UpsertService(svc(1, "Cut"))).unwrap();
            store.dispatch(Action::LogIn(session("Client"))).unwrap();
            store.dispatch(Action::AddToCart(5)).unwrap();
            store.dispatch(Action::AddToCart(5)).unwrap();

            // Hand the same persister to a fresh store
            let store2 = Store::load(store.persister).unwrap();
            assert_eq!(store2.state().services.len(), 1);
            assert_eq!(store2.state().session.as_ref().unwrap().user.username, "a");
            assert_eq!(store2.state().cart, vec![CartItem { product_id: 5, quantity: 2 }]);
        }
    }

    #[test]
    fn logout_clears_session_and_goes_home() {
        let mut store = Store::load(MemoryPersister::default()).unwrap();
        store.dispatch(Action::LogIn(session(ROLE_SUPER_ADMIN))).unwrap();
        store.dispatch(Action::Navigate(Page::AdminDashboard)).unwrap();
        assert_eq!(store.state().page, Page::AdminDashboard);

        store.dispatch(Action::LogOut).unwrap();
        assert_eq!(store.state().page, Page::Home);
        assert!(store.state().session.is_none());
        assert!(store.persister.load("session").unwrap().is_none());
    }

    #[test]
    fn navigation_guard_applies_at_dispatch() {
        let mut store = Store::load(MemoryPersister::default()).unwrap();
        store.dispatch(Action::Navigate(Page::AdminDashboard)).unwrap();
        assert_eq!(store.state().page, Page::ClientLogin);

        store.dispatch(Action::LogIn(session("Client"))).unwrap();
        store.dispatch(Action::Navigate(Page::AdminOrders)).unwrap();
        assert_eq!(store.state().page, Page::ClientLogin);

        store.dispatch(Action::LogIn(session(ROLE_SUPER_ADMIN))).unwrap();
        store.dispatch(Action::Navigate(Page::AdminOrders)).unwrap();
        assert_eq!(store.state().page, Page::AdminOrders);
    }

    #[test]
    fn removing_a_product_empties_it_from_the_cart() {
        let mut store = Store::load(MemoryPersister::default()).unwrap();
        store.dispatch(Action::AddToCart(3)).unwrap();
        store.dispatch(Action::RemoveProduct(3)).unwrap();
        assert!(store.state().cart.is_empty());
    }

    #[test]
    fn snapshot_replaces_only_present_collections() {
        let mut store = Store::load(MemoryPersister::default()).unwrap();
        store.dispatch(Action::UpsertService(svc(1, "Cut"))).unwrap();
        store
            .dispatch(Action::ApplySnapshot(SyncSnapshot {
                services: Some(vec![svc(10, "Color"), svc(11, "Braids")]),
                ..Default::default()
            }))
            .unwrap();
        assert_eq!(store.state().services.len(), 2);
        // Untouched collections keep their local state
        assert!(store.state().orders.is_empty());
    }
}
