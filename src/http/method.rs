use strum::EnumString;

#[derive(EnumString, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Method {
    #[strum(serialize = "GET")]
    GET,
    #[strum(serialize = "POST")]
    POST,
}
