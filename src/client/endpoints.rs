//! 관리자 API 엔드포인트 표
//!
//! 경로 템플릿은 `:name` 자리표시자를 쓴다. `render_path` 로 치환하지 않은
//! 템플릿을 그대로 요청에 쓰지 않는다.

use super::ClientError;
use reqwest::{Method, Url};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub template: &'static str,
}

impl Endpoint {
    fn new(method: Method, template: &'static str) -> Self {
        Self { method, template }
    }

    /// 템플릿에 들어 있는 자리표시자 이름
    pub fn placeholders(&self) -> Vec<&'static str> {
        self.template
            .split('/')
            .filter_map(|segment| segment.strip_prefix(':'))
            .collect()
    }
}

macro_rules! operations {
    ($($name:ident => $method:ident $template:literal,)+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Operation {
            $($name,)+
        }

        impl Operation {
            pub const ALL: &'static [Operation] = &[$(Operation::$name,)+];

            pub fn endpoint(self) -> Endpoint {
                match self {
                    $(Operation::$name => Endpoint::new(Method::$method, $template),)+
                }
            }
        }
    };
}

operations! {
    Health => GET "/health",

    Login => POST "/api/v1/auth/login",
    Refresh => POST "/api/v1/auth/refresh",
    Me => GET "/api/v1/auth/me",

    ListSellers => GET "/api/v1/sellers",
    GetSeller => GET "/api/v1/sellers/:id",
    CreateSeller => POST "/api/v1/sellers",
    UpdateSeller => PUT "/api/v1/sellers/:id",
    UpdateSellerStatus => PATCH "/api/v1/sellers/:id/status",
    DeleteSeller => DELETE "/api/v1/sellers/:id",

    ListUsers => GET "/api/v1/users",
    GetUser => GET "/api/v1/users/:id",
    UpdateUser => PUT "/api/v1/users/:id",
    UpdateUserStatus => PATCH "/api/v1/users/:id/status",
    DeleteUser => DELETE "/api/v1/users/:id",

    ListProducts => GET "/api/v1/products",
    GetProduct => GET "/api/v1/products/:id",
    CreateProduct => POST "/api/v1/products",
    UpdateProduct => PUT "/api/v1/products/:id",
    UpdateProductStatus => PATCH "/api/v1/products/:id/status",
    DeleteProduct => DELETE "/api/v1/products/:id",

    ListReviews => GET "/api/v1/reviews",
    UpdateReviewVisibility => PATCH "/api/v1/reviews/:id/visibility",
    DeleteReview => DELETE "/api/v1/reviews/:id",

    ListOrders => GET "/api/v1/orders",
    ListOrderInconsistencies => GET "/api/v1/orders/inconsistencies",
    GetOrder => GET "/api/v1/orders/:id",
    UpdateOrderStatus => PATCH "/api/v1/orders/:id/status",
    UpsertDelivery => PUT "/api/v1/orders/:id/delivery",
    RefundOrderItem => POST "/api/v1/orders/:id/items/:item_id/refund",

    ListSettlements => GET "/api/v1/settlements",
    GetSettlement => GET "/api/v1/settlements/:id",
    UpdateSettlementStatus => PATCH "/api/v1/settlements/:id/status",
    AdjustSettlement => POST "/api/v1/settlements/:id/adjust",
    RecalculateSettlement => POST "/api/v1/settlements/:id/recalculate",
    ListPeriods => GET "/api/v1/settlements/periods",
    GetPeriod => GET "/api/v1/settlements/periods/:id",
    CreatePeriod => POST "/api/v1/settlements/periods",
    UpdatePeriodStatus => PATCH "/api/v1/settlements/periods/:id/status",
    CalculatePeriod => POST "/api/v1/settlements/periods/:id/calculate",

    ListCoupons => GET "/api/v1/coupons",
    GetCoupon => GET "/api/v1/coupons/:id",
    CreateCoupon => POST "/api/v1/coupons",
    UpdateCoupon => PUT "/api/v1/coupons/:id",
    DeleteCoupon => DELETE "/api/v1/coupons/:id",
    IssueCoupon => POST "/api/v1/coupons/:id/issue",
    ListIssuedCoupons => GET "/api/v1/coupons/:id/issued",
    PreviewDiscount => GET "/api/v1/coupons/:id/discount-preview",

    ListNotices => GET "/api/v1/notices",
    GetNotice => GET "/api/v1/notices/:id",
    CreateNotice => POST "/api/v1/notices",
    UpdateNotice => PUT "/api/v1/notices/:id",
    DeleteNotice => DELETE "/api/v1/notices/:id",

    ListInquiries => GET "/api/v1/inquiries",
    GetInquiry => GET "/api/v1/inquiries/:id",
    CreateInquiry => POST "/api/v1/inquiries",
    DeleteInquiry => DELETE "/api/v1/inquiries/:id",
    AnswerInquiry => POST "/api/v1/inquiries/:id/answer",
    CloseInquiry => POST "/api/v1/inquiries/:id/close",

    ListFaqs => GET "/api/v1/faq",
    GetFaq => GET "/api/v1/faq/:id",
    CreateFaq => POST "/api/v1/faq",
    UpdateFaq => PUT "/api/v1/faq/:id",
    DeleteFaq => DELETE "/api/v1/faq/:id",

    ListGuides => GET "/api/v1/guides",
    GetGuide => GET "/api/v1/guides/:id",
    CreateGuide => POST "/api/v1/guides",
    UpdateGuide => PUT "/api/v1/guides/:id",
    DeleteGuide => DELETE "/api/v1/guides/:id",

    ListErrorReports => GET "/api/v1/errorReport",
    GetErrorReport => GET "/api/v1/errorReport/:id",
    CreateErrorReport => POST "/api/v1/errorReport",
    UpdateErrorReport => PUT "/api/v1/errorReport/:id",
    DeleteErrorReport => DELETE "/api/v1/errorReport/:id",

    ListTerms => GET "/api/v1/terms",
    GetTerm => GET "/api/v1/terms/:id",
    CreateTerm => POST "/api/v1/terms",
    UpdateTerm => PUT "/api/v1/terms/:id",
    DeleteTerm => DELETE "/api/v1/terms/:id",
    ActivateTerm => POST "/api/v1/terms/:id/activate",

    ListBanners => GET "/api/v1/banners",
    GetBanner => GET "/api/v1/banners/:id",
    CreateBanner => POST "/api/v1/banners",
    UpdateBanner => PUT "/api/v1/banners/:id",
    DeleteBanner => DELETE "/api/v1/banners/:id",

    ListAttachments => GET "/api/v1/attachments",
    GetAttachment => GET "/api/v1/attachments/:id",
    UploadAttachment => POST "/api/v1/attachments",
    DeleteAttachment => DELETE "/api/v1/attachments/:id",
}

/// 자리표시자를 URL 인코딩된 값으로 치환한다.
///
/// 남은 자리표시자나 쓰이지 않은 파라미터가 있으면 실패한다.
pub fn render_path(template: &str, params: &[(&str, &str)]) -> Result<String, ClientError> {
    let mut used = vec![false; params.len()];
    let mut segments = Vec::new();

    for segment in template.split('/').filter(|s| !s.is_empty()) {
        match segment.strip_prefix(':') {
            Some(name) => {
                let index = params
                    .iter()
                    .position(|(key, _)| *key == name)
                    .ok_or_else(|| {
                        ClientError::Path(format!("missing value for `:{name}` in {template}"))
                    })?;
                let value = params[index].1;
                if value.is_empty() {
                    return Err(ClientError::Path(format!(
                        "empty value for `:{name}` in {template}"
                    )));
                }
                used[index] = true;
                segments.push(value);
            }
            None => segments.push(segment),
        }
    }

    if let Some(index) = used.iter().position(|u| !u) {
        return Err(ClientError::Path(format!(
            "parameter `{}` is not used by {template}",
            params[index].0
        )));
    }

    // 세그먼트 인코딩은 Url 에 맡긴다
    let mut url = Url::parse("http://localhost/")
        .map_err(|e| ClientError::Path(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ClientError::Path("base url cannot hold a path".to_string()))?
        .clear()
        .extend(segments);
    Ok(url.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_endpoint_is_unique() {
        let mut seen = HashSet::new();
        for op in Operation::ALL {
            let endpoint = op.endpoint();
            assert!(
                seen.insert((endpoint.method.clone(), endpoint.template)),
                "{op:?} duplicates {} {}",
                endpoint.method,
                endpoint.template
            );
        }
        assert_eq!(seen.len(), Operation::ALL.len());
    }

    #[test]
    fn test_every_template_renders_without_placeholders() {
        for op in Operation::ALL {
            let endpoint = op.endpoint();
            let names = endpoint.placeholders();
            let params: Vec<(&str, &str)> = names.iter().map(|name| (*name, "7")).collect();
            let path = render_path(endpoint.template, &params).unwrap();
            assert!(!path.contains(':'), "{op:?} rendered {path}");
        }
    }

    #[test]
    fn test_render_path_substitutes_and_encodes() {
        let path = render_path(
            "/api/v1/orders/:id/items/:item_id/refund",
            &[("item_id", "9"), ("id", "a/b c")],
        )
        .unwrap();
        assert_eq!(path, "/api/v1/orders/a%2Fb%20c/items/9/refund");
    }

    #[test]
    fn test_render_path_rejects_missing_and_unused_params() {
        assert!(matches!(
            render_path("/api/v1/sellers/:id", &[]),
            Err(ClientError::Path(_))
        ));
        assert!(matches!(
            render_path("/api/v1/sellers", &[("id", "1")]),
            Err(ClientError::Path(_))
        ));
        assert!(matches!(
            render_path("/api/v1/sellers/:id", &[("id", "")]),
            Err(ClientError::Path(_))
        ));
    }

    #[actix_web::test]
    async fn test_every_operation_hits_a_registered_route() {
        use actix_web::{App, http::StatusCode, test};

        let app = test::init_service(
            App::new()
                .configure(crate::handlers::health_config)
                .service(actix_web::web::scope("/api/v1").configure(crate::handlers::api_config)),
        )
        .await;

        for op in Operation::ALL {
            let endpoint = op.endpoint();
            let params: Vec<(&str, &str)> = endpoint
                .placeholders()
                .into_iter()
                .map(|name| (name, "1"))
                .collect();
            let path = render_path(endpoint.template, &params).unwrap();
            let method = actix_web::http::Method::from_bytes(endpoint.method.as_str().as_bytes())
                .unwrap();
            let req = test::TestRequest::default()
                .method(method)
                .uri(&path)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_ne!(resp.status(), StatusCode::NOT_FOUND, "{op:?} {path}");
            assert_ne!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{op:?} {path}");
        }
    }
}
