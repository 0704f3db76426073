mod accounts;
mod authentication;
mod helpers;
mod id_recycling;
