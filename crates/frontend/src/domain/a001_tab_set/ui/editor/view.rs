use super::view_model::TabSetEditorVm;
use crate::domain::a001_tab_set::drag_reorder::DropHalf;
use crate::domain::a001_tab_set::gateway::SaveStatus;
use crate::domain::a001_tab_set::tab_list::RowKey;
use crate::shared::icons::icon;
use crate::shared::tab_widget::TabWidget;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element};

fn use_vm() -> TabSetEditorVm {
    use_context::<TabSetEditorVm>().expect("TabSetEditorVm not found")
}

/// Editor panel: placeholder when nothing is open.
#[component]
#[allow(non_snake_case)]
pub fn TabSetEditor() -> impl IntoView {
    let vm = use_vm();

    view! {
        <Show
            when=move || vm.open.get()
            fallback=|| view! {
                <div class="tab-sets-placeholder">
                    <h3>"Select a tab set to edit, or create a new one."</h3>
                </div>
            }
        >
            <EditorForm />
        </Show>
    }
}

#[component]
#[allow(non_snake_case)]
fn EditorForm() -> impl IntoView {
    let vm = use_vm();
    let rows_ref = NodeRef::<leptos::html::Div>::new();

    // Bring an appended row into view.
    Effect::new(move |_| {
        if vm.appended.get() == 0 {
            return;
        }
        if let Some(container) = rows_ref.get_untracked() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    view! {
        <div class="tab-set-editor">
            <div class="tab-set-editor__header">
                <h2>{move || vm.editor_title()}</h2>
                <ShortcodeBox />
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}
            {move || vm.warning.get().map(|w| view! { <div class="warning" role="alert">{w}</div> })}

            <div class="form-group">
                <label for="tab-set-name">"Tab Set Name"</label>
                <input
                    type="text"
                    id="tab-set-name"
                    placeholder="e.g. Product Features"
                    prop:value=move || vm.name.get()
                    on:input=move |ev| vm.name.set(event_target_value(&ev))
                />
                <p class="description">
                    "An internal label; it also becomes the ARIA label for the tab list."
                </p>
            </div>

            <h3>"Tabs"</h3>
            <p class="description">
                "Add, edit, and remove tabs. Drag the handle (≡) to reorder. HTML is allowed in content."
            </p>

            <div
                class="tab-rows"
                node_ref=rows_ref
                on:dragover=move |ev: DragEvent| ev.prevent_default()
                on:drop=move |ev: DragEvent| ev.prevent_default()
            >
                <For
                    each=move || vm.visual_keys()
                    key=|key| *key
                    children=move |key| view! { <TabRowEditor row=key /> }
                />
                <div
                    class="tab-rows__end"
                    on:dragover=move |ev: DragEvent| {
                        ev.prevent_default();
                        vm.drag_over_end();
                    }
                ></div>
            </div>

            <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.add_tab()>
                {icon("plus")}
                " Add Tab"
            </Button>

            <div class="tab-set-editor__footer">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || vm.is_saving())
                    on_click=move |_| vm.save()
                >
                    {icon("save")}
                    {move || if vm.is_saving() { " Saving…" } else { " Save Tab Set" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.cancel()>
                    {icon("cancel")}
                    " Cancel"
                </Button>
                <span class="save-status" aria-live="polite">
                    {move || match vm.status() {
                        SaveStatus::Saved => "✓ Saved!",
                        _ => "",
                    }}
                </span>
            </div>

            <div class="tab-set-preview">
                <h3>"Live Preview"</h3>
                <div class="tab-set-preview__box">
                    <TabWidget
                        tabs=Signal::derive(move || vm.preview_tabs())
                        label=Signal::derive(move || vm.name.get())
                    />
                </div>
            </div>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn ShortcodeBox() -> impl IntoView {
    let vm = use_vm();

    move || {
        vm.shortcode().map(|code| {
            view! {
                <div class="shortcode-area">
                    <label>"Shortcode:"</label>
                    <input type="text" class="shortcode-input" readonly=true prop:value=code />
                    <Button
                        appearance=ButtonAppearance::Secondary
                        size=ButtonSize::Small
                        on_click=move |_| vm.copy_shortcode()
                    >
                        {icon("copy")}
                        {move || if vm.copied.get() { " Copied!" } else { " Copy" }}
                    </Button>
                </div>
            }
        })
    }
}

#[component]
#[allow(non_snake_case)]
fn TabRowEditor(row: RowKey) -> impl IntoView {
    let vm = use_vm();

    let row_class = move || {
        let mut class = String::from("tab-row");
        if vm.dragged_key() == Some(row) {
            class.push_str(" tab-row--dragging");
        }
        if vm.is_removing(row) {
            class.push_str(" tab-row--removing");
        }
        if vm.is_collapsed(row) {
            class.push_str(" tab-row--collapsed");
        }
        class
    };

    let on_drag_start = move |ev: DragEvent| {
        if !vm.drag_start(row) {
            ev.prevent_default();
            return;
        }
        if let Some(dt) = ev.data_transfer() {
            dt.set_effect_allowed("move");
            let _ = dt.set_data("text/plain", "");
        }
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        let Some(target) = ev
            .current_target()
            .and_then(|t| t.dyn_into::<Element>().ok())
        else {
            return;
        };
        let rect = target.get_bounding_client_rect();
        let half = DropHalf::from_pointer(ev.client_y() as f64, rect.top(), rect.height());
        vm.drag_over(row, half);
    };

    let on_drag_end = move |ev: DragEvent| {
        let dropped = ev
            .data_transfer()
            .map(|dt| dt.drop_effect() != "none")
            .unwrap_or(false);
        vm.drag_end(dropped);
    };

    view! {
        <div class=row_class on:dragover=on_drag_over>
            <div class="tab-row__header">
                <span
                    class="tab-row__handle"
                    title="Drag to reorder"
                    draggable="true"
                    on:dragstart=on_drag_start
                    on:dragend=on_drag_end
                >
                    "≡"
                </span>
                <span class="tab-row__number">{move || format!("Tab {}", vm.row_number(row))}</span>
                <span class="tab-row__title-preview">{move || vm.row_title_preview(row)}</span>
                <button
                    type="button"
                    class="tab-row__toggle"
                    aria-expanded=move || (!vm.is_collapsed(row)).to_string()
                    on:click=move |_| vm.toggle_collapsed(row)
                >
                    {move || if vm.is_collapsed(row) { icon("chevron-right") } else { icon("chevron-down") }}
                </button>
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    on_click=move |_| vm.remove_tab(row)
                >
                    {icon("delete")}
                    " Remove"
                </Button>
            </div>
            <div class="tab-row__body" hidden=move || vm.is_collapsed(row)>
                <input
                    type="text"
                    class="tab-row__title"
                    placeholder="Enter tab title"
                    prop:value=move || vm.row_title(row)
                    on:input=move |ev| vm.rename(row, event_target_value(&ev))
                />
                <textarea
                    class="tab-row__content"
                    placeholder="Enter content here"
                    rows="5"
                    prop:value=move || vm.row_content(row)
                    on:input=move |ev| vm.set_content(row, event_target_value(&ev))
                ></textarea>
            </div>
        </div>
    }
}
