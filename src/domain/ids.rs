use uuid::Uuid;

const ID_LEN: usize = 12;

pub fn generate_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LEN);
    id
}

pub fn generate_unique_id<'a>(taken: impl IntoIterator<Item = &'a str> + Clone) -> String {
    loop {
        let candidate = generate_id();
        if !taken.clone().into_iter().any(|existing| existing == candidate) {
            return candidate;
        }
    }
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
