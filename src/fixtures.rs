use crate::models::Book;

/// Fixed demo set loaded by /seed. Indexed by id, so reseeding upserts
/// instead of duplicating.
pub fn sample_books() -> Vec<Book> {
    vec![
        Book {
            id: "1".into(),
            title: "The Great Gatsby".into(),
            author: "F. Scott Fitzgerald".into(),
            genre: vec!["Fiction".into(), "Classic".into()],
            publish_year: 1925,
            description: "A classic American novel set in the Jazz Age, exploring themes of wealth, love, and the American Dream".into(),
            rating: 4.2,
            price: 12.99,
        },
        Book {
            id: "2".into(),
            title: "To Kill a Mockingbird".into(),
            author: "Harper Lee".into(),
            genre: vec!["Fiction".into(), "Drama".into()],
            publish_year: 1960,
            description: "A gripping tale of racial injustice and childhood innocence in the American South".into(),
            rating: 4.5,
            price: 14.99,
        },
        Book {
            id: "3".into(),
            title: "Harry Potter and the Sorcerers Stone".into(),
            author: "J.K. Rowling".into(),
            genre: vec!["Fantasy".into(), "Young Adult".into()],
            publish_year: 1997,
            description: "A young wizard discovers his magical heritage on his 11th birthday".into(),
            rating: 4.7,
            price: 16.99,
        },
        Book {
            id: "4".into(),
            title: "The Hobbit".into(),
            author: "J.R.R. Tolkien".into(),
            genre: vec!["Fantasy".into(), "Adventure".into()],
            publish_year: 1937,
            description: "Bilbo Baggins embarks on an unexpected journey to help dwarves reclaim their homeland".into(),
            rating: 4.4,
            price: 13.99,
        },
        Book {
            id: "5".into(),
            title: "Pride and Prejudice".into(),
            author: "Jane Austen".into(),
            genre: vec!["Romance".into(), "Classic".into()],
            publish_year: 1813,
            description: "A witty romance between Elizabeth Bennet and Mr. Darcy in Georgian England".into(),
            rating: 4.3,
            price: 11.99,
        },
    ]
}
