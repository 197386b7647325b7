//! Display names for the questionnaire's option identifiers.

/// Ordered id → display name table for one kind of option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameLookup {
    entries: Vec<(String, String)>,
}

impl NameLookup {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect(),
        }
    }

    pub fn name(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry_id, _)| entry_id == id)
            .map(|(_, name)| name.as_str())
    }

    /// Display name, or the id itself when the option is unknown.
    pub fn name_or_id<'a>(&'a self, id: &'a str) -> &'a str {
        self.name(id).unwrap_or(id)
    }
}

/// A functional module and its selectable sub-modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDefinition {
    pub id: String,
    pub name: String,
    pub sub_modules: NameLookup,
}

/// Every option-name table the questionnaire refers to.
#[derive(Debug, Clone, Default)]
pub struct OptionNames {
    pub roles: NameLookup,
    pub team_locations: NameLookup,
    pub deployment_environments: NameLookup,
    pub target_regions: NameLookup,
    pub compliance: NameLookup,
    pub integrations: NameLookup,
    pub pricing_models: NameLookup,
    pub support_levels: NameLookup,
    pub support_durations: NameLookup,
    pub modules: Vec<ModuleDefinition>,
}

impl OptionNames {
    pub fn module(&self, id: &str) -> Option<&ModuleDefinition> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn standard() -> Self {
        Self {
            roles: NameLookup::from_pairs(&[
                ("project_manager", "Project Manager"),
                ("business_analyst", "Business Analyst"),
                ("ui_ux_designer", "UI/UX Designer"),
                ("backend_developer", "Backend Developer"),
                ("frontend_developer", "Frontend Developer"),
                ("mobile_app_developer_ios", "Mobile App Developer (iOS)"),
                ("mobile_app_developer_android", "Mobile App Developer (Android)"),
                ("qa_engineer", "Quality Assurance (QA) Engineer"),
                ("devops_engineer", "DevOps Engineer"),
                ("solution_architect", "Solution Architect"),
                ("technical_lead", "Technical Lead"),
                ("data_scientist", "Data Scientist"),
            ]),
            team_locations: NameLookup::from_pairs(&[
                ("onshore", "Onshore"),
                ("offshore", "Offshore"),
                ("hybrid", "Hybrid"),
            ]),
            deployment_environments: NameLookup::from_pairs(&[
                ("aws", "AWS (Amazon Web Services)"),
                ("gcp", "GCP (Google Cloud Platform)"),
                ("azure", "Azure (Microsoft Azure)"),
                ("on_premise", "On-Premise"),
                ("hybrid_cloud", "Hybrid Cloud"),
                ("client_infra", "Client's Existing Infrastructure"),
            ]),
            target_regions: NameLookup::from_pairs(&[
                ("india", "India"),
                ("us", "United States (US)"),
                ("europe", "Europe"),
                ("africa", "Africa"),
                ("apac_ex_india", "Asia Pacific (Excluding India)"),
                ("middle_east", "Middle East"),
                ("south_america", "South America"),
                ("canada", "Canada"),
                ("australia_nz", "Australia/New Zealand"),
                ("global", "Global"),
            ]),
            compliance: NameLookup::from_pairs(&[
                ("gdpr", "GDPR (General Data Protection Regulation)"),
                ("iso27001", "ISO 27001 (Information Security Management)"),
                (
                    "hipaa",
                    "HIPAA (Health Insurance Portability and Accountability Act)",
                ),
                ("ccpa", "CCPA (California Consumer Privacy Act)"),
                (
                    "pci_dss",
                    "PCI DSS (Payment Card Industry Data Security Standard)",
                ),
                ("soc2", "SOC 2 (Service Organization Control 2)"),
            ]),
            integrations: NameLookup::from_pairs(&[
                ("whatsapp", "WhatsApp API"),
                ("twilio", "Twilio (SMS, Voice)"),
                ("sendgrid", "SendGrid (Email)"),
                ("stripe", "Payment Gateway: Stripe"),
                ("paypal", "Payment Gateway: PayPal"),
                ("razorpay", "Payment Gateway: Razorpay"),
                ("payu", "Payment Gateway: PayU"),
                ("salesforce", "CRM: Salesforce"),
                ("hubspot", "CRM: HubSpot"),
                ("sap", "ERP: SAP"),
                ("oracle_erp", "ERP: Oracle"),
                ("quickbooks", "Accounting: QuickBooks"),
                ("xero", "Accounting: Xero"),
                ("mailchimp", "Marketing: Mailchimp"),
                ("google_analytics", "Analytics: Google Analytics"),
                ("mixpanel", "Analytics: Mixpanel"),
                ("facebook_api", "Social Media: Facebook API"),
                ("twitter_api", "Social Media: Twitter API"),
                ("linkedin_api", "Social Media: LinkedIn API"),
                ("google_drive", "Cloud Storage: Google Drive"),
                ("dropbox", "Cloud Storage: Dropbox"),
                ("zoom_api", "Video Conferencing: Zoom API"),
                ("agora_api", "Video Conferencing: Agora API"),
                ("generic_sms_gateway", "SMS Gateways (local/specific)"),
            ]),
            pricing_models: NameLookup::from_pairs(&[
                ("fixed_price", "Fixed Price (Lump Sum)"),
                ("time_material", "Time & Material (Hourly/Daily Rates)"),
                (
                    "hybrid",
                    "Hybrid (Fixed price for phases, T&M for ongoing support)",
                ),
            ]),
            support_levels: NameLookup::from_pairs(&[
                ("basic", "Basic Support"),
                ("standard", "Standard Support"),
                ("premium", "Premium Support"),
            ]),
            support_durations: NameLookup::from_pairs(&[
                ("3_months", "3 Months"),
                ("6_months", "6 Months"),
                ("1_year", "1 Year"),
                ("ongoing", "Ongoing (Annual Contract)"),
            ]),
            modules: standard_modules(),
        }
    }
}

fn module(id: &str, name: &str, sub_modules: &[(&str, &str)]) -> ModuleDefinition {
    ModuleDefinition {
        id: id.to_string(),
        name: name.to_string(),
        sub_modules: NameLookup::from_pairs(sub_modules),
    }
}

fn standard_modules() -> Vec<ModuleDefinition> {
    vec![
        module(
            "userManagement",
            "User Management",
            &[
                ("authentication", "Authentication (Email/Password, Social Login, SSO)"),
                ("rbac", "Role-Based Access Control (RBAC)"),
                ("userProfiles", "User Profiles"),
                ("userOnboardingOffboarding", "User Onboarding/Offboarding"),
            ],
        ),
        module(
            "communication",
            "Communication",
            &[
                ("chat", "Chat (1-on-1, Group, Real-time)"),
                ("emailSending", "Email Sending (Transactional, Marketing)"),
                ("inAppNotifications", "In-App Notifications"),
                ("pushNotifications", "Push Notifications (for mobile)"),
                ("smsNotifications", "SMS Notifications"),
                (
                    "teleconferenceIntegration",
                    "Teleconference Integration (e.g., Zoom, Google Meet)",
                ),
            ],
        ),
        module(
            "dataContentManagement",
            "Data & Content Management",
            &[
                ("dashboard", "Dashboard (Analytics, Reporting)"),
                ("cms", "Content Management System (CMS)"),
                ("documentManagement", "Document Management"),
                ("mediaManagement", "Media Management (Images, Videos)"),
            ],
        ),
        module(
            "businessOperations",
            "Business Operations",
            &[
                ("inventoryManagement", "Inventory Management"),
                ("invoicing", "Invoicing"),
                ("billingPayments", "Billing & Payments (Subscription, One-time)"),
                ("orderManagement", "Order Management"),
                ("crm", "Customer Relationship Management (CRM)"),
                ("reportingAnalytics", "Reporting & Analytics"),
            ],
        ),
        module(
            "schedulingPlanning",
            "Scheduling & Planning",
            &[
                ("appointmentsBooking", "Appointments Booking"),
                ("calendaring", "Calendaring (Personal, Shared)"),
                ("projectTimelinesGantt", "Project Timelines using Gantt Charts"),
                ("resourceScheduling", "Resource Scheduling"),
            ],
        ),
        module(
            "advancedSpecific",
            "Advanced/Specific",
            &[
                ("geolocationMaps", "Geolocation/Maps Integration"),
                (
                    "ecommerceFeatures",
                    "E-commerce Features (Product Catalog, Shopping Cart, Checkout)",
                ),
                (
                    "searchFunctionality",
                    "Search Functionality (Basic, Advanced, Faceted)",
                ),
                ("multiLanguageSupport", "Multi-language Support"),
                ("adminPanel", "Admin Panel"),
                ("auditLogs", "Audit Logs"),
            ],
        ),
    ]
}
