mod helpers;
mod search;
mod show;

pub(crate) use search::cmd_search;
pub(crate) use show::cmd_show;
