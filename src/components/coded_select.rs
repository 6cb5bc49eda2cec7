//! Coded Select Component
//!
//! Select input for a coded field. A stored code this build does not know
//! gets its own option, so opening and saving a form leaves it in place.

use crm_core::labels::{CodeLabel, Coded};
use leptos::prelude::*;

/// `(code, label)` pairs for the select, the unknown stored code first
fn options<T: CodeLabel>(current: &Coded<T>) -> Vec<(String, String)> {
    let unknown = match current {
        Coded::Unknown(raw) => Some((raw.clone(), raw.clone())),
        Coded::Known(_) => None,
    };
    unknown
        .into_iter()
        .chain(T::ALL.iter().map(|v| (v.code().to_string(), v.label().to_string())))
        .collect()
}

#[component]
pub fn CodedSelect<T>(value: RwSignal<Coded<T>>) -> impl IntoView
where
    T: CodeLabel + Send + Sync + 'static,
{
    let choices = value.with_untracked(options);

    view! {
        <select
            prop:value=move || value.with(|v| v.code().to_string())
            on:change=move |ev| value.set(Coded::from_raw(&event_target_value(&ev)))
        >
            {choices.into_iter().map(|(code, label)| view! { <option value=code>{label}</option> }).collect_view()}
        </select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_core::domain::LeadStatus;

    #[test]
    fn test_known_value_lists_every_stage() {
        let opts = options(&Coded::Known(LeadStatus::Negotiating));
        assert_eq!(opts.len(), LeadStatus::ALL.len());
        assert_eq!(opts[0], ("novo".to_string(), "Novo Lead".to_string()));
    }

    #[test]
    fn test_unknown_value_keeps_its_option() {
        let stored = Coded::<LeadStatus>::Unknown("arquivado".to_string());
        let opts = options(&stored);
        assert_eq!(opts.len(), LeadStatus::ALL.len() + 1);
        assert_eq!(opts[0], ("arquivado".to_string(), "arquivado".to_string()));

        // re-reading the untouched select gives back the stored value
        assert_eq!(Coded::<LeadStatus>::from_raw(&opts[0].0), stored);
        assert_eq!(Coded::from_raw(&opts[0].0).changed_from(&stored), None);
    }
}
