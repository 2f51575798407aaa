//! Compiled-in default content: first-run seed for the remote store and the
//! last-resort fallback when neither the remote store nor the snapshot cache
//! can produce a document. Sections are exposed individually so migration
//! can substitute a single missing section without touching the rest.

use crate::core::types::{
    About, ContactSection, ContentDocument, DocumentMetadata, GallerySection, Hero, IconFeature,
    MediaItem, MediaKind, Review, Room, RoomsSection, ServiceItem, ServicesSection, SiteConfig,
    SocialLinks, TestimonialsSection, VirtualTour,
};

pub fn default_site_config() -> SiteConfig {
    SiteConfig {
        favicon: String::new(),
        logo: String::new(),
        title: "Casa del Sol Guesthouse".to_string(),
        description: "A small family-run guesthouse where traditional charm meets modern comfort."
            .to_string(),
    }
}

pub fn default_hero() -> Hero {
    Hero {
        title: "Casa del Sol".to_string(),
        subtitle: "Where tradition and comfort meet".to_string(),
        background_image: String::new(),
    }
}

pub fn default_about() -> About {
    About {
        title: "Welcome to Casa del Sol".to_string(),
        description1: "Set in a quiet corner of the old town, Casa del Sol is a cozy refuge that \
                       combines the warmth of a family home with everything you need for a \
                       comfortable stay."
            .to_string(),
        description2: "Colorful courtyards, handcrafted details and a familiar atmosphere make \
                       every visit feel like coming home."
            .to_string(),
        image: String::new(),
        features: vec![
            IconFeature {
                name: "Family atmosphere".to_string(),
                icon: "users".to_string(),
            },
            IconFeature {
                name: "High-speed WiFi".to_string(),
                icon: "wifi".to_string(),
            },
            IconFeature {
                name: "Central location".to_string(),
                icon: "map-pin".to_string(),
            },
            IconFeature {
                name: "24/7 check-in".to_string(),
                icon: "clock".to_string(),
            },
        ],
    }
}

pub fn default_rooms() -> RoomsSection {
    RoomsSection {
        title: "Our Rooms".to_string(),
        subtitle: "Unique spaces designed for comfort and an authentic stay.".to_string(),
        rooms: vec![
            Room {
                name: "Standard Room".to_string(),
                description: "Ideal for travellers looking for comfort at an accessible price."
                    .to_string(),
                price: Some("$45/night".to_string()),
                price_visible: true,
                legacy_image_url: String::new(),
                media: vec![],
                features: vec![
                    "1 double bed".to_string(),
                    "Private bathroom".to_string(),
                    "WiFi".to_string(),
                ],
                is_featured: false,
            },
            Room {
                name: "Superior Room".to_string(),
                description: "Spacious room with handcrafted details and a view of the inner patio."
                    .to_string(),
                price: Some("$65/night".to_string()),
                price_visible: true,
                legacy_image_url: String::new(),
                media: vec![],
                features: vec![
                    "1 king bed".to_string(),
                    "En-suite bathroom".to_string(),
                    "Private balcony".to_string(),
                ],
                is_featured: true,
            },
            Room {
                name: "Family Suite".to_string(),
                description: "Our largest suite, with original details and all modern comforts."
                    .to_string(),
                price: Some("$95/night".to_string()),
                price_visible: true,
                legacy_image_url: String::new(),
                media: vec![],
                features: vec![
                    "Bedroom + living room".to_string(),
                    "Full bathroom".to_string(),
                    "Private terrace".to_string(),
                ],
                is_featured: false,
            },
        ],
    }
}

pub fn default_virtual_tour() -> VirtualTour {
    VirtualTour {
        title: "Virtual Tour".to_string(),
        subtitle: "Walk through every corner of the guesthouse from wherever you are.".to_string(),
        video_url: String::new(),
    }
}

pub fn default_gallery() -> GallerySection {
    GallerySection {
        title: "Gallery".to_string(),
        subtitle: "A glimpse of the spaces that make the house unique.".to_string(),
        items: vec![MediaItem {
            kind: MediaKind::Image,
            url: String::new(),
            alt_text: "Guesthouse facade".to_string(),
            thumbnail_url: None,
        }],
    }
}

pub fn default_services() -> ServicesSection {
    ServicesSection {
        title: "Our Services".to_string(),
        subtitle: "More than a place to sleep.".to_string(),
        services: vec![
            ServiceItem {
                name: "Comfortable Rooms".to_string(),
                description: "Rooms decorated in a unique style, combining comfort and character."
                    .to_string(),
                icon: "bed".to_string(),
            },
            ServiceItem {
                name: "Homemade Breakfast".to_string(),
                description: "Start the day with local ingredients and traditional recipes."
                    .to_string(),
                icon: "utensils-crossed".to_string(),
            },
            ServiceItem {
                name: "Free WiFi".to_string(),
                description: "Stay connected throughout the house.".to_string(),
                icon: "wifi".to_string(),
            },
            ServiceItem {
                name: "Local Tours".to_string(),
                description: "Information and bookings for the best spots in the region."
                    .to_string(),
                icon: "mountain".to_string(),
            },
        ],
    }
}

pub fn default_testimonials() -> TestimonialsSection {
    TestimonialsSection {
        title: "What our guests say".to_string(),
        subtitle: "Real experiences from travellers who stayed with us.".to_string(),
        note: String::new(),
        reviews: vec![
            Review {
                name: "Maria G.".to_string(),
                rating: 5,
                comment: "An authentic experience, every detail of the house radiates warmth."
                    .to_string(),
                initials: "MG".to_string(),
                map_link: String::new(),
            },
            Review {
                name: "John S.".to_string(),
                rating: 5,
                comment: "The perfect balance between character and comfort. We will be back."
                    .to_string(),
                initials: "JS".to_string(),
                map_link: String::new(),
            },
        ],
    }
}

pub fn default_contact() -> ContactSection {
    ContactSection {
        title: "Book your stay".to_string(),
        subtitle: String::new(),
        description: "We are available to answer your questions and help you plan your visit."
            .to_string(),
        phone: String::new(),
        whatsapp: String::new(),
        email: "stay@casadelsol.example".to_string(),
        address: "Main Street 123".to_string(),
        hours: String::new(),
        social_links: SocialLinks::default(),
    }
}

/// The complete default document, at version 0.
pub fn default_content() -> ContentDocument {
    ContentDocument {
        site_config: default_site_config(),
        hero: default_hero(),
        about: default_about(),
        location: None,
        rooms: default_rooms(),
        virtual_tour: default_virtual_tour(),
        gallery: default_gallery(),
        services: default_services(),
        testimonials: default_testimonials(),
        contact: default_contact(),
        footer: None,
        map: None,
        metadata: DocumentMetadata {
            version: 0,
            last_updated: None,
        },
    }
}
