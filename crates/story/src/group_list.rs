use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gpui::*;
use gpui_component::input::{Input, InputEvent, InputState};
use gpui_component::{ActiveTheme as _, h_flex, v_flex};
use gpui_forms_core::{Field, Form};
use gpui_group_list::{FormState, GroupListState, group_list};
use serde_json::{Value, json};

pub struct GroupListExample {
    form: Entity<FormState>,
    list: Entity<GroupListState>,
    // One InputState per namespaced path, created on first render of that
    // panel. Values commit on Enter.
    inputs: Rc<RefCell<HashMap<String, Entity<InputState>>>>,
}

impl GroupListExample {
    pub fn view(window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(window, cx))
    }

    fn new(_window: &mut Window, cx: &mut Context<Self>) -> Self {
        let form = cx.new(|_| {
            FormState::new(Form::from_values(json!({
                "gallery": [
                    { "alt": "Cover", "caption": "Front cover art" },
                    { "alt": "", "caption": "Untitled sketch" },
                ]
            })))
        });

        let field = Field::new("gallery", "group-list")
            .label("Images")
            .default_item(json!({ "alt": "", "caption": "" }))
            .fields([
                Field::new("alt", "text").label("Alt"),
                Field::new("caption", "text").label("Caption"),
            ]);

        let list = cx.new(|cx| GroupListState::new(field, form.clone(), cx));
        cx.observe(&form, |_, _, cx| cx.notify()).detach();

        Self {
            form,
            list,
            inputs: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl Render for GroupListExample {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let dump = self
            .form
            .read(cx)
            .form()
            .value_at("gallery")
            .and_then(|value| serde_json::to_string_pretty(value).ok())
            .unwrap_or_else(|| "[]".to_string());

        // Paths address by index, so an input for a removed item's path will
        // never render again; drop entries past the current length.
        let len = self.form.read(cx).form().items("gallery").len();
        self.inputs.borrow_mut().retain(|path, _| {
            path.split('.')
                .nth(1)
                .and_then(|ix| ix.parse::<usize>().ok())
                .is_some_and(|ix| ix < len)
        });

        let inputs = Rc::clone(&self.inputs);
        let list = group_list(&self.list, move |form, fields, window, cx| {
            render_sub_fields(&inputs, form, fields, window, cx)
        });

        v_flex()
            .size_full()
            .p(px(16.))
            .gap_y_3()
            .child(
                v_flex()
                    .gap_y_1()
                    .child(
                        div()
                            .text_xl()
                            .font_weight(FontWeight::BOLD)
                            .child("Group List"),
                    )
                    .child(div().text_sm().text_color(theme.muted_foreground).child(
                        "Add items with +, drag the handle to reorder, click a title to open \
                         its panel. Edits commit on Enter.",
                    )),
            )
            .child(
                h_flex()
                    .flex_1()
                    .min_h(px(0.))
                    .gap_x_3()
                    .child(
                        v_flex()
                            .w(px(420.))
                            .min_w(px(0.))
                            .h_full()
                            .child(list),
                    )
                    .child(
                        v_flex()
                            .flex_1()
                            .min_w(px(0.))
                            .h_full()
                            .gap_y_2()
                            .child(
                                div()
                                    .text_sm()
                                    .font_weight(FontWeight::MEDIUM)
                                    .child("Form value"),
                            )
                            .child(
                                div()
                                    .flex_1()
                                    .min_h(px(0.))
                                    .rounded(px(12.))
                                    .border_1()
                                    .border_color(theme.border)
                                    .bg(theme.background)
                                    .p(px(12.))
                                    .font_family(theme.mono_font_family.clone())
                                    .child(render_dump(dump)),
                            ),
                    ),
            )
    }
}

/// A deliberately small stand-in for a generic field renderer: one text
/// input per namespaced sub-field, writing back through the shared form.
fn render_sub_fields(
    inputs: &Rc<RefCell<HashMap<String, Entity<InputState>>>>,
    form: &Entity<FormState>,
    fields: &[Field],
    window: &mut Window,
    cx: &mut App,
) -> AnyElement {
    let muted_foreground = cx.theme().muted_foreground;
    let mut column = v_flex().gap_y_2().pt(px(4.));

    for field in fields {
        let input = input_for(inputs, form, field, window, cx);

        // Reorders remap which record a path addresses; follow the form
        // unless the user is mid-edit in this input.
        let current = form
            .read(cx)
            .form()
            .value_at(&field.name)
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        input.update(cx, |state, cx| {
            let focused = state.focus_handle(cx).is_focused(window);
            if !focused && state.value().to_string() != current {
                state.set_value(current, window, cx);
            }
        });

        column = column.child(
            v_flex()
                .gap_y_1()
                .child(
                    div()
                        .text_xs()
                        .text_color(muted_foreground)
                        .child(field.display_label().to_string()),
                )
                .child(Input::new(&input)),
        );
    }

    column.into_any_element()
}

fn input_for(
    inputs: &Rc<RefCell<HashMap<String, Entity<InputState>>>>,
    form: &Entity<FormState>,
    field: &Field,
    window: &mut Window,
    cx: &mut App,
) -> Entity<InputState> {
    if let Some(input) = inputs.borrow().get(&field.name) {
        return input.clone();
    }

    let path = field.name.clone();
    let placeholder = field.display_label().to_string();
    let initial = form
        .read(cx)
        .form()
        .value_at(&path)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let input = cx.new(|cx| {
        let mut state = InputState::new(window, cx);
        state.set_placeholder(placeholder, window, cx);
        state.set_value(initial, window, cx);
        state
    });

    let form = form.clone();
    let commit_path = path.clone();
    cx.subscribe(&input, move |input, event: &InputEvent, cx| {
        if matches!(event, InputEvent::PressEnter { .. }) {
            let text = input.read(cx).value().to_string();
            form.update(cx, |form, cx| {
                let _ = form.form_mut().set(&commit_path, json!(text));
                cx.notify();
            });
        }
    })
    .detach();

    inputs.borrow_mut().insert(path, input.clone());
    input
}

fn render_dump(text: String) -> impl IntoElement {
    let lines = text
        .lines()
        .map(|line| div().text_sm().child(line.to_string()));
    v_flex().gap_y_0p5().children(lines)
}
