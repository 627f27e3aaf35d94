pub mod mail_dispatcher;
