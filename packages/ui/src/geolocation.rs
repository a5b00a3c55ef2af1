//! One-shot browser geolocation.

use store::Coordinates;

/// Ask the browser where we are. `None` when it is unsupported, denied or
/// times out, in which case callers fall back to the configured center.
#[cfg(target_arch = "wasm32")]
pub async fn current_position() -> Option<Coordinates> {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::channel::oneshot;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{GeolocationPosition, GeolocationPositionError, PositionOptions};

    let geolocation = web_sys::window()?.navigator().geolocation().ok()?;

    let (tx, rx) = oneshot::channel::<Option<Coordinates>>();
    // Exactly one of the two callbacks fires.
    let tx = Rc::new(RefCell::new(Some(tx)));

    let success_tx = tx.clone();
    let on_success = Closure::once(move |position: GeolocationPosition| {
        let coords = position.coords();
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Some(Coordinates::new(coords.latitude(), coords.longitude())));
        }
    });
    let on_error = Closure::once(move |e: GeolocationPositionError| {
        tracing::warn!("geolocation unavailable: {}", e.message());
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(None);
        }
    });

    let options = PositionOptions::new();
    options.set_enable_high_accuracy(true);
    options.set_timeout(5_000);
    options.set_maximum_age(0);

    if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(
        on_success.as_ref().unchecked_ref(),
        Some(on_error.as_ref().unchecked_ref()),
        &options,
    ) {
        tracing::warn!("geolocation request failed: {e:?}");
        return None;
    }

    let position = rx.await.ok().flatten();
    drop((on_success, on_error));
    position
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn current_position() -> Option<Coordinates> {
    None
}
