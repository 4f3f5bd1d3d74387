pub async fn get_health() -> &'static str {
    "Student App API is running."
}
