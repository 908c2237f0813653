mod auth;
mod encoding;
mod groups;
mod tracks;
mod users;
