use crate::data::StudentStore;
use maud::{DOCTYPE, Markup, html};
use std::{ops::Deref, sync::Arc};

#[derive(Clone, Debug)]
pub struct RegistryState {
    store: Arc<dyn StudentStore>,
}

impl RegistryState {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    #[allow(clippy::unused_self)] //in case self is ever needed :)
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://unpkg.com/htmx-ext-json-enc@2.0.1/json-enc.js" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Student Registration" }
                }
                body class="bg-gray-900 h-screen flex flex-col items-center justify-center text-white" {
                    (markup)
                }
            }
        }
    }
}

impl Deref for RegistryState {
    type Target = dyn StudentStore;

    fn deref(&self) -> &Self::Target {
        self.store.as_ref()
    }
}
