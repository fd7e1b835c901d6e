pub mod group_list;
