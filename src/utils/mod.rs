pub mod regex_cache;
