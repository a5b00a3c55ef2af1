use std::rc::Rc;

use api::auth::otp::{OtpChallenge, OTP_LENGTH};
use dioxus::prelude::*;

/// Six single-digit fields bound to an OTP challenge. Focus follows the
/// challenge's rules: forward after a digit, back after clearing.
#[component]
pub fn OtpInput(challenge: Signal<Option<OtpChallenge>>) -> Element {
    let mut challenge = challenge;
    let mut fields = use_signal(|| vec![None::<Rc<MountedData>>; OTP_LENGTH]);

    let focus = move |index: Option<usize>| {
        let Some(field) = index.and_then(|i| fields.read().get(i).cloned().flatten()) else {
            return;
        };
        spawn(async move {
            if let Err(e) = field.set_focus(true).await {
                tracing::debug!("focus failed: {e:?}");
            }
        });
    };

    rsx! {
        div {
            class: "otp-fields",
            for i in 0..OTP_LENGTH {
                input {
                    key: "{i}",
                    class: "otp-digit",
                    r#type: "text",
                    inputmode: "numeric",
                    maxlength: "1",
                    autocomplete: "one-time-code",
                    value: challenge.read().as_ref().map(|c| c.digit(i)).unwrap_or_default(),
                    onmounted: move |evt: MountedEvent| fields.write()[i] = Some(evt.data()),
                    oninput: move |evt: FormEvent| {
                        let next = challenge
                            .write()
                            .as_mut()
                            .and_then(|c| c.set_digit(i, &evt.value()));
                        focus(next);
                    },
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Backspace {
                            let prev = challenge.read().as_ref().and_then(|c| c.on_backspace(i));
                            focus(prev);
                        }
                    },
                }
            }
        }
    }
}
