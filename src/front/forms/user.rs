#[derive(serde::Deserialize, Debug)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
}
