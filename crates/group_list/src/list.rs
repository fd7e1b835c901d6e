use std::rc::Rc;

use gpui::{
    AnyElement, App, AppContext as _, ClickEvent, Context, CursorStyle, ElementId, Entity,
    EntityId, FocusHandle, FontWeight, InteractiveElement as _, IntoElement, ParentElement as _,
    Render, RenderOnce, ScrollHandle, SharedString, StatefulInteractiveElement as _,
    StyleRefinement, Styled, Window, div, prelude::FluentBuilder as _, px,
};
use gpui_component::button::{Button, ButtonVariants as _};
use gpui_component::{
    ActiveTheme as _, Icon, IconName, Sizable as _, StyledExt as _, h_flex, v_flex,
};
use gpui_forms_core::{Field, GroupListController, ItemToken};

use crate::form_state::FormState;

const CONTEXT: &str = "GroupList";

/// Create a [`GroupList`].
///
/// `render_fields` is the sub-field renderer: it receives the shared form
/// and the namespaced descriptors of one expanded item and produces the
/// panel body.
pub fn group_list<R>(state: &Entity<GroupListState>, render_fields: R) -> GroupList
where
    R: Fn(&Entity<FormState>, &[Field], &mut Window, &mut App) -> AnyElement + 'static,
{
    GroupList::new(state, render_fields)
}

#[derive(Clone)]
struct GroupListDrag {
    list_id: EntityId,
    token: ItemToken,
    title: SharedString,
    ix: usize,
}

/// Per-row flags handed to styling.
#[derive(Clone, Copy, Debug, Default)]
pub struct GroupListRowState {
    pub expanded: bool,
    pub dragging: bool,
}

type RenderFields = Rc<dyn Fn(&Entity<FormState>, &[Field], &mut Window, &mut App) -> AnyElement>;

/// State for one group-list field: an ordered set of sub-records bound to an
/// array value of the form, with add/remove, drag reordering and per-item
/// detail panels.
pub struct GroupListState {
    focus_handle: FocusHandle,
    form: Entity<FormState>,
    list: GroupListController,
    scroll_handle: ScrollHandle,
    render_fields: RenderFields,
}

impl GroupListState {
    pub fn new(field: Field, form: Entity<FormState>, cx: &mut Context<Self>) -> Self {
        let mut list = GroupListController::new(field);
        list.sync_with(form.read(cx).form());
        cx.observe(&form, |_, _, cx| cx.notify()).detach();
        Self {
            focus_handle: cx.focus_handle(),
            form,
            list,
            scroll_handle: ScrollHandle::new(),
            render_fields: Rc::new(|_, _, _, _| div().into_any_element()),
        }
    }

    pub fn form(&self) -> &Entity<FormState> {
        &self.form
    }

    pub fn field(&self) -> &Field {
        self.list.field()
    }

    pub fn controller(&self) -> &GroupListController {
        &self.list
    }

    fn on_add(&mut self, _: &ClickEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let form = self.form.clone();
        let _ = form.update(cx, |form, cx| {
            let result = self.list.add_item(form.form_mut());
            cx.notify();
            result
        });
        cx.notify();
    }

    fn on_remove(&mut self, token: ItemToken, cx: &mut Context<Self>) {
        let form = self.form.clone();
        let _ = form.update(cx, |form, cx| {
            let result = self.list.remove_item(token, form.form_mut());
            cx.notify();
            result
        });
        cx.notify();
    }

    fn on_expand(&mut self, token: ItemToken, cx: &mut Context<Self>) {
        self.list.expand(token);
        cx.notify();
    }

    fn on_collapse(&mut self, token: ItemToken, cx: &mut Context<Self>) {
        self.list.collapse(token);
        cx.notify();
    }

    fn on_drag_start(&mut self, drag: &GroupListDrag, cx: &mut Context<Self>) {
        if drag.list_id != cx.entity_id() {
            return;
        }
        self.list.begin_drag(drag.token);
        cx.notify();
    }

    fn on_drop_on_row(&mut self, drag: &GroupListDrag, target_ix: usize, cx: &mut Context<Self>) {
        if drag.list_id != cx.entity_id() {
            return;
        }
        let form = self.form.clone();
        let _ = form.update(cx, |form, cx| {
            let result = self.list.complete_drag_at(target_ix, form.form_mut());
            cx.notify();
            result
        });
        cx.notify();
    }

    fn on_drop_after_last(&mut self, drag: &GroupListDrag, cx: &mut Context<Self>) {
        if drag.list_id != cx.entity_id() {
            return;
        }
        let form = self.form.clone();
        let _ = form.update(cx, |form, cx| {
            let result = self.list.complete_drag_to_end(form.form_mut());
            cx.notify();
            result
        });
        cx.notify();
    }
}

impl Render for GroupListState {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        // A drag that ended outside any drop target leaves no completion
        // event behind; treat it as abandoned.
        if !cx.has_active_drag() {
            self.list.cancel_drag();
        }

        let field = self.list.field().clone();
        let (titles, len) = {
            let form = self.form.read(cx).form();
            let items = form.items(&field.name);
            let titles: Vec<String> = items.iter().map(|item| field.item_title(item)).collect();
            (titles, items.len())
        };
        self.list.sync_len(len);

        let list_id = cx.entity_id();
        let state_entity = cx.entity();
        let border = cx.theme().border;
        let background = cx.theme().background;
        let muted = cx.theme().muted;
        let muted_foreground = cx.theme().muted_foreground;
        let radius = cx.theme().radius;
        let drop_target_bg = cx.theme().drop_target;
        let drag_border = cx.theme().drag_border;

        let mut rows = Vec::with_capacity(len);
        for ix in 0..len {
            let Some(token) = self.list.token_at(ix) else {
                continue;
            };
            let title: SharedString = titles[ix].clone().into();
            let row_state = GroupListRowState {
                expanded: self.list.is_expanded(token),
                dragging: self.list.dragging_token() == Some(token) && cx.has_active_drag(),
            };

            let drag_value = GroupListDrag {
                list_id,
                token,
                title: title.clone(),
                ix,
            };

            let handle = {
                let state_entity = state_entity.clone();
                div()
                    .id(("group-item-handle", ix))
                    .flex_none()
                    .w(px(28.))
                    .py(px(8.))
                    .flex()
                    .justify_center()
                    .cursor(CursorStyle::OpenHand)
                    .child(
                        Icon::new(IconName::Menu)
                            .small()
                            .text_color(muted_foreground),
                    )
                    .on_drag(drag_value, move |drag, _offset, _window, cx| {
                        state_entity.update(cx, |state, cx| {
                            state.on_drag_start(drag, cx);
                        });
                        let title = drag.title.clone();
                        cx.new(|_| DragGhost { title })
                    })
            };

            let header = h_flex()
                .items_center()
                .when(row_state.dragging, |this| this.opacity(0.4))
                .child(handle)
                .child(
                    div()
                        .id(("group-item-title", ix))
                        .flex_1()
                        .min_w(px(0.))
                        .px(px(8.))
                        .py(px(8.))
                        .text_sm()
                        .font_weight(FontWeight::MEDIUM)
                        .truncate()
                        .cursor_pointer()
                        .on_click(cx.listener(move |this, _, _window, cx| {
                            this.on_expand(token, cx);
                        }))
                        .child(title.clone()),
                )
                .child(
                    Button::new(("group-item-remove", ix))
                        .icon(IconName::Minus)
                        .ghost()
                        .small()
                        .on_click(cx.listener(move |this, _, _window, cx| {
                            this.on_remove(token, cx);
                        })),
                );

            let mut row = div()
                .id(ix)
                .relative()
                .border_b_1()
                .border_color(border)
                .bg(background)
                .child(header)
                .drag_over::<GroupListDrag>(move |style, drag, _window, _cx| {
                    if drag.list_id != list_id {
                        return style;
                    }

                    let mut style = style.bg(drop_target_bg.alpha(drop_target_bg.a.max(0.2)));
                    style = style.border_color(drag_border);
                    if ix < drag.ix {
                        style = style.border_t_2();
                    } else if ix > drag.ix {
                        style = style.border_b_2();
                    }
                    style
                })
                .on_drop::<GroupListDrag>(cx.listener(move |this, drag, _window, cx| {
                    this.on_drop_on_row(drag, ix, cx);
                }));

            if row_state.expanded {
                let fields = self.list.namespaced_fields(ix);
                let render_fields = Rc::clone(&self.render_fields);
                let body = render_fields(&self.form, &fields, window, cx);

                row = row.child(
                    v_flex()
                        .border_t_1()
                        .border_color(border)
                        .bg(muted.alpha(0.3))
                        .child(
                            h_flex()
                                .id(("group-panel-header", ix))
                                .items_center()
                                .gap_x_2()
                                .px(px(8.))
                                .py(px(6.))
                                .cursor_pointer()
                                .on_click(cx.listener(move |this, _, _window, cx| {
                                    this.on_collapse(token, cx);
                                }))
                                .child(
                                    Icon::new(IconName::ChevronUp)
                                        .small()
                                        .text_color(muted_foreground),
                                )
                                .child(div().text_sm().text_color(muted_foreground).child(title)),
                        )
                        .child(div().px(px(8.)).pb(px(8.)).child(body)),
                );
            }

            rows.push(row);
        }

        v_flex()
            .size_full()
            .gap_y_2()
            .child(
                h_flex()
                    .items_center()
                    .justify_between()
                    .child(
                        div()
                            .text_sm()
                            .font_weight(FontWeight::MEDIUM)
                            .child(field.display_label().to_string()),
                    )
                    .child(
                        Button::new("group-list-add")
                            .icon(IconName::Plus)
                            .ghost()
                            .small()
                            .on_click(cx.listener(Self::on_add)),
                    ),
            )
            .child(
                v_flex()
                    .id("group-list-items")
                    .flex_1()
                    .min_h(px(0.))
                    .overflow_y_scroll()
                    .track_scroll(&self.scroll_handle)
                    .rounded(radius)
                    .border_1()
                    .border_color(border)
                    .when(len == 0, |this| {
                        this.child(
                            h_flex()
                                .justify_center()
                                .py(px(10.))
                                .text_sm()
                                .text_color(muted_foreground)
                                .child("There's no items"),
                        )
                    })
                    .children(rows)
                    .on_drop::<GroupListDrag>(cx.listener(|this, drag, _window, cx| {
                        this.on_drop_after_last(drag, cx);
                    })),
            )
    }
}

/// Pointer-following preview of the dragged row: its handle glyph and
/// resolved title, detached from the list chrome.
struct DragGhost {
    title: SharedString,
}

impl Render for DragGhost {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        h_flex()
            .items_center()
            .gap_x_2()
            .px(px(10.))
            .py(px(6.))
            .rounded(theme.radius)
            .bg(theme.popover)
            .border_1()
            .border_color(theme.border)
            .shadow_md()
            .text_sm()
            .text_color(theme.popover_foreground)
            .child(
                Icon::new(IconName::Menu)
                    .small()
                    .text_color(theme.muted_foreground),
            )
            .child(
                div()
                    .max_w(px(280.))
                    .truncate()
                    .font_weight(FontWeight::MEDIUM)
                    .child(self.title.clone()),
            )
    }
}

/// A group-list form field element.
#[derive(IntoElement)]
pub struct GroupList {
    id: ElementId,
    state: Entity<GroupListState>,
    style: StyleRefinement,
    render_fields: RenderFields,
}

impl GroupList {
    pub fn new<R>(state: &Entity<GroupListState>, render_fields: R) -> Self
    where
        R: Fn(&Entity<FormState>, &[Field], &mut Window, &mut App) -> AnyElement + 'static,
    {
        Self {
            id: ElementId::Name(format!("group-list-{}", state.entity_id()).into()),
            state: state.clone(),
            style: StyleRefinement::default(),
            render_fields: Rc::new(render_fields),
        }
    }
}

impl Styled for GroupList {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl RenderOnce for GroupList {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let focus_handle = self.state.read(cx).focus_handle.clone();
        self.state
            .update(cx, |state, _| state.render_fields = self.render_fields);

        div()
            .id(self.id)
            .key_context(CONTEXT)
            .track_focus(&focus_handle)
            .size_full()
            .child(self.state)
            .refine_style(&self.style)
    }
}
