//! Rule-based reply generation.
//!
//! Replies are picked from an ordered rule table: the first rule with any
//! keyword appearing as a substring of the lower-cased input wins. Rules are
//! not mutually exclusive, so table order decides priority.

/// Greeting stored as the first agent message of every session.
pub const WELCOME_MESSAGE: &str = "Xin chào! Tôi là trợ lý ảo của tiệm bánh. Tôi có thể giúp bạn đặt bánh, tư vấn sản phẩm, và trả lời các câu hỏi về dịch vụ của chúng tôi. Bạn cần hỗ trợ gì hôm nay?";

const ORDERING_REPLY: &str = "Tuyệt vời! Để đặt bánh, bạn vui lòng cho tôi biết:\n• Loại bánh bạn muốn\n• Số lượng\n• Thời gian nhận hàng\n• Địa chỉ giao hàng (nếu cần)\n\nChúng tôi có bánh sinh nhật, bánh cưới, bánh kem, bánh mì và nhiều loại khác!";

const PRICING_REPLY: &str = "Bảng giá các sản phẩm của chúng tôi:\n• Bánh sinh nhật: 250,000 - 1,500,000 VNĐ\n• Bánh kem nhỏ: 150,000 - 300,000 VNĐ\n• Bánh mì: 15,000 - 25,000 VNĐ\n• Bánh ngọt: 20,000 - 80,000 VNĐ\n\nGiá có thể thay đổi tùy theo kích thước và thiết kế!";

const LOCATION_REPLY: &str = "Tiệm bánh của chúng tôi tọa lạc tại:\n📍 123 Đường ABC, Quận 1, TP.HCM\n📞 Hotline: 0123-456-789\n🕒 Giờ mở cửa: 7:00 - 22:00 hàng ngày\n\nChúng tôi cũng có dịch vụ giao hàng tận nơi!";

const DEFAULT_REPLY: &str = "Cảm ơn bạn đã liên hệ! Tôi đã ghi nhận thông tin của bạn. Nhân viên của chúng tôi sẽ liên hệ lại trong thời gian sớm nhất để hỗ trợ bạn tốt hơn. Bạn có thể đặt thêm câu hỏi khác không?";

struct ReplyRule {
    keywords: &'static [&'static str],
    template: &'static str,
}

/// Priority order: ordering > pricing > location. Keywords are lower-case.
const RULES: &[ReplyRule] = &[
    ReplyRule {
        keywords: &["đặt bánh", "order", "mua"],
        template: ORDERING_REPLY,
    },
    ReplyRule {
        keywords: &["giá", "price", "bao nhiêu"],
        template: PRICING_REPLY,
    },
    ReplyRule {
        keywords: &["địa chỉ", "address", "ở đâu"],
        template: LOCATION_REPLY,
    },
];

/// Maps free-text input to a canned reply.
///
/// Total and side-effect-free; unmatched input (including empty input) falls
/// to the default acknowledgment.
pub fn generate_reply(input: &str) -> &'static str {
    let normalized = input.to_lowercase();

    RULES
        .iter()
        .find(|rule| {
            rule.keywords
                .iter()
                .any(|keyword| normalized.contains(keyword))
        })
        .map_or(DEFAULT_REPLY, |rule| rule.template)
}
