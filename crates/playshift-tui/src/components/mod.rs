pub mod confirm_dialog;
pub mod dashboard;
pub mod header;
pub mod help_overlay;
pub mod import_form;
pub mod log_panel;
pub mod playlist_list;
pub mod song_detail;
pub mod song_manager;
