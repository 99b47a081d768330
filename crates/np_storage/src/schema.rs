//! `$jsonSchema` validators for the two collections. Validation runs at
//! write time with strict level, so a document violating these is
//! rejected by the server, not by application code.

use bson::{doc, Document};

pub fn articles_validator() -> Document {
    doc! {
        "$jsonSchema": {
            "bsonType": "object",
            "required": [
                "title",
                "coverImage",
                "publisherName",
                "publisherLogo",
                "authorName",
                "datePosted",
                "quickSummary",
                "detailedSummary",
                "whyItMatters",
                "sourceUrl",
                "category",
                "createdAt",
                "updatedAt"
            ],
            "properties": {
                "title": {
                    "bsonType": "string",
                    "minLength": 1,
                    "maxLength": 500,
                    "description": "Article title must be a string between 1 and 500 characters"
                },
                "coverImage": {
                    "bsonType": "string",
                    "pattern": "^https?://",
                    "description": "Cover image must be a valid URL"
                },
                "publisherName": {
                    "bsonType": "string",
                    "minLength": 1,
                    "maxLength": 100,
                    "description": "Publisher name must be a string between 1 and 100 characters"
                },
                "publisherLogo": {
                    "bsonType": "string",
                    "pattern": "^https?://",
                    "description": "Publisher logo must be a valid URL"
                },
                "authorName": {
                    "bsonType": "string",
                    "minLength": 1,
                    "maxLength": 100,
                    "description": "Author name must be a string between 1 and 100 characters"
                },
                "datePosted": {
                    "bsonType": "date",
                    "description": "Date posted must be a valid date"
                },
                "quickSummary": {
                    "bsonType": "string",
                    "minLength": 10,
                    "maxLength": 500,
                    "description": "Quick summary must be a string between 10 and 500 characters"
                },
                "detailedSummary": {
                    "bsonType": "string",
                    "minLength": 50,
                    "maxLength": 2000,
                    "description": "Detailed summary must be a string between 50 and 2000 characters"
                },
                "whyItMatters": {
                    "bsonType": "string",
                    "minLength": 50,
                    "maxLength": 1000,
                    "description": "Why it matters must be a string between 50 and 1000 characters"
                },
                "sourceUrl": {
                    "bsonType": "string",
                    "pattern": "^https?://",
                    "description": "Source URL must be a valid URL"
                },
                "category": {
                    "bsonType": "string",
                    "enum": ["AI", "Technology", "Startups", "Funding", "Machine Learning"],
                    "description": "Category must be one of the allowed values"
                },
                "createdAt": {
                    "bsonType": "date",
                    "description": "Created at must be a valid date"
                },
                "updatedAt": {
                    "bsonType": "date",
                    "description": "Updated at must be a valid date"
                }
            },
            "additionalProperties": true
        }
    }
}

pub fn chats_validator() -> Document {
    doc! {
        "$jsonSchema": {
            "bsonType": "object",
            "required": [
                "sessionId",
                "articleId",
                "articleTitle",
                "messages",
                "createdAt",
                "updatedAt"
            ],
            "properties": {
                "sessionId": {
                    "bsonType": "string",
                    "minLength": 10,
                    "maxLength": 50,
                    "description": "Session ID must be a string between 10 and 50 characters"
                },
                "articleId": {
                    "bsonType": "objectId",
                    "description": "Article ID must be a valid ObjectId"
                },
                "articleTitle": {
                    "bsonType": "string",
                    "minLength": 1,
                    "maxLength": 500,
                    "description": "Article title must be a string between 1 and 500 characters"
                },
                "messages": {
                    "bsonType": "array",
                    "minItems": 0,
                    "description": "Messages must be an array",
                    "items": {
                        "bsonType": "object",
                        "required": ["text", "isUser", "timestamp"],
                        "properties": {
                            "text": {
                                "bsonType": "string",
                                "minLength": 1,
                                "maxLength": 2000,
                                "description": "Message text must be a string between 1 and 2000 characters"
                            },
                            "isUser": {
                                "bsonType": "bool",
                                "description": "isUser must be a boolean"
                            },
                            "timestamp": {
                                "bsonType": "date",
                                "description": "Timestamp must be a valid date"
                            }
                        },
                        "additionalProperties": true
                    }
                },
                "createdAt": {
                    "bsonType": "date",
                    "description": "Created at must be a valid date"
                },
                "updatedAt": {
                    "bsonType": "date",
                    "description": "Updated at must be a valid date"
                }
            },
            "additionalProperties": true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn articles_validator_requires_every_persisted_field() {
        let validator = articles_validator();
        let schema = validator.get_document("$jsonSchema").unwrap();
        let required = schema.get_array("required").unwrap();
        assert_eq!(required.len(), 13);
    }

    #[test]
    fn chats_validator_constrains_message_shape() {
        let validator = chats_validator();
        let items = validator
            .get_document("$jsonSchema")
            .unwrap()
            .get_document("properties")
            .unwrap()
            .get_document("messages")
            .unwrap()
            .get_document("items")
            .unwrap();
        let required = items.get_array("required").unwrap();
        assert_eq!(required.len(), 3);
    }
}
