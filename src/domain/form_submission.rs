use crate::domain::FormParams;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct FormSubmission {
    pub name: String,
    pub email: String,
    pub city: String,
    pub zip: String,
    pub comments: String,
    pub code: String,
}

impl From<&FormParams> for FormSubmission {
    fn from(params: &FormParams) -> Self {
        let field = |key: &str| params.get(key).unwrap_or_default().to_string();
        Self {
            name: field("name"),
            email: field("email"),
            city: field("city"),
            zip: field("zip"),
            comments: field("comments"),
            code: field("code"),
        }
    }
}

impl FormSubmission {
    /// Plain-text notification for the shop. Fields are interpolated as posted.
    pub fn notification_body(&self) -> String {
        format!(
            "A New Yome Request!!\n\
             \n\
             We are interested in a Yome!\n\
             \n\
             Name:     {name}\n\
             Email:    {email}\n\
             City:     {city}\n\
             ZIP Code: {zip}\n\
             Comments:\n\
             {comments}\n\
             \n\
             You can view the yome here:\n\
             http://redskyshelters.com/calculator/#!/yome/{code}\n\
             \n\
             Enjoy!!!\n",
            name = self.name,
            email = self.email,
            city = self.city,
            zip = self.zip,
            comments = self.comments,
            code = self.code,
        )
    }
}
