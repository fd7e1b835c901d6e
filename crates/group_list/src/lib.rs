mod form_state;
mod list;

pub use form_state::FormState;
pub use list::{GroupList, GroupListRowState, GroupListState, group_list};
