//! Static field tables backing the extraction catalog.
//!
//! Field names are kept verbatim from the URAR form layouts, including
//! punctuation, checkbox blanks, and fill-in underscores, because the
//! extraction instruction quotes them to the model and every downstream
//! comparison keys on them. Do not "fix" spelling or spacing here.

pub(crate) const BASE_INFO_FIELDS: &[&str] = &[
    "APPRAISAL FORM TYPE (1004/1025/1004D/1073)",
    "Additional Form (1007/216/Rental/STR)",
    "ANSI Standard Confirmation",
    "Reasonable Exposure Time Comment",
    "Prior Service Certification",
];

pub(crate) const SUBJECT_FIELDS: &[&str] = &[
    "FHA",
    "Property Address",
    "City",
    "County",
    "State",
    "Zip Code",
    "Borrower",
    "Owner of Public Record",
    "Legal Description",
    "Assessor's Parcel #",
    "Tax Year",
    "R.E. Taxes $",
    "Neighborhood Name",
    "Map Reference",
    "Census Tract",
    "Occupant",
    "Special Assessments $",
    "PUD",
    "HOA $",
    "HOA(per year/per month)",
    "Property Rights Appraised",
    "Assignment Type",
    "Lender/Client",
    "Address (Lender/Client)",
    "Offered for Sale in Last 12 Months",
    "Report data source(s) used, offering price(s), and date(s)",
];

pub(crate) const CONTRACT_FIELDS: &[&str] = &[
    "I _____ analyze the contract for sale for the subject purchase transaction.",
    "Explain the results of the analysis of the contract for sale or why the analysis was not performed.",
    "Contract Price $",
    "Date of Contract",
    "Is the property seller the owner of public record?(Yes/No)",
    "Data Source(s)",
    "Is there any financial assistance (loan charges, sale concessions, gift or downpay i etc.) to be paid by any party on behalf of the borrower?(Yes/No)",
    "If Yes, report the total dollar amount and describe the items to be paid.",
];

pub(crate) const NEIGHBORHOOD_FIELDS: &[&str] = &[
    "Location",
    "Built-Up",
    "Growth",
    "Property Values",
    "Demand/Supply",
    "Marketing Time",
    "One-Unit",
    "2-4 Unit",
    "Multi-Family",
    "Commercial",
    "Other",
    "Present Land Use Other Description",
    "one unit housing price(high,low,pred)",
    "one unit housing age(high,low,pred)",
    "Neighborhood Boundaries",
    "Neighborhood Description",
    "Market Conditions:",
];

pub(crate) const SITE_FIELDS: &[&str] = &[
    "Dimensions",
    "Area",
    "Shape",
    "View",
    "Specific Zoning Classification",
    "Zoning Description",
    "Zoning Compliance",
    "Zoning Compliance Comment",
    "Is the highest and best use of subject property as improved (or as proposed per plans and specifications) the present use?",
    "Electricity",
    "Gas",
    "Water",
    "Sanitary Sewer",
    "Street",
    "Alley",
    "FEMA Special Flood Hazard Area",
    "FEMA Flood Zone",
    "FEMA Map #",
    "FEMA Map Date",
    "Are the utilities and off-site improvements typical for the market area?",
    "Are there any adverse site conditions or external factors (easements, encroachments, environmental conditions, land uses, etc.)(Yes/No)?",
    "If Yes, describe",
];

pub(crate) const IMPROVEMENTS_FIELDS: &[&str] = &[
    "Units",
    "# of Stories",
    "Type",
    "One with Accessory Unit (ADU)",
    "Existing/Proposed/Under Const.",
    "Design (Style)",
    "Year Built",
    "Effective Age (Yrs)",
    "Foundation Type",
    "Basement Area sq.ft.",
    "Basement Finish",
    "Evidence of",
    "Foundation Walls (Material/Condition)",
    "Exterior Walls (Material/Condition)",
    "Roof Surface (Material/Condition)",
    "Gutters & Downspouts (Material/Condition)",
    "Window Type (Material/Condition)",
    "Storm Sash/Insulated",
    "Screens",
    "Floors (Material/Condition)",
    "Walls (Material/Condition)",
    "Trim/Finish (Material/Condition)",
    "Bath Floor (Material/Condition)",
    "Bath Wainscot (Material/Condition)",
    "Attic",
    "Heating Type",
    "Fuel",
    "Cooling Type",
    "Fireplace(s) #",
    "Patio/Deck",
    "Pool",
    "Woodstove(s) #",
    "Fence",
    "Porch",
    "Other Amenities",
    "Car Storage",
    "Driveway # of Cars",
    "Driveway Surface",
    "Garage # of Cars",
    "Carport # of Cars",
    "Garage (Att./Det./Built-in)",
    "Appliances (Refrigerator,Range/Oven, Dishwasher, Disposal, Microwave, Washer/Dryer, Other (describe))",
    "Finished area above grade Rooms",
    "Finished area above grade Bedrooms",
    "Finished area above grade Bath(s)",
    "Square Feet of Gross Living Area Above Grade",
    "Additional features",
    "Describe the condition of the property",
    "Are there any physical deficiencies or adverse conditions that affect the livability, soundness, or structural integrity of the property?",
    "If Yes, describe",
    "Does the property generally conform to the neighborhood (functional utility, style, condition, use, construction, etc.)?",
    "If No, describe",
];

pub(crate) const SALES_GRID_FIELDS: &[&str] = &[
    "Address",
    "Proximity to Subject",
    "Sale Price",
    "Sale Price/Gross Liv. Area",
    "Data Source(s)",
    "Verification Source(s)",
    "Sale or Financing Concessions",
    "Sale or Financing Concessions Adjustment",
    "Date of Sale/Time",
    "Date of Sale/Time Adjustment",
    "Location",
    "Location Adjustment",
    "Leasehold/Fee Simple",
    "Leasehold/Fee Simple Adjustment",
    "Site",
    "Site Adjustment",
    "View",
    "View Adjustment",
    "Design (Style)",
    "Design (Style) Adjustment",
    "Quality of Construction",
    "Quality of Construction Adjustment",
    "Actual Age",
    "Actual Age Adjustment",
    "Condition",
    "Condition Adjustment",
    "Total Rooms",
    "Bedrooms",
    "Baths",
    "Gross Living Area",
    "Gross Living Area Adjustment",
    "Basement & Finished Rooms Below Grade",
    "Basement & Finished Rooms Below Grade Adjustment",
    "Functional Utility",
    "Functional Utility Adjustment",
    "Heating/Cooling",
    "Heating/Cooling Adjustment",
    "Energy Efficient Items",
    "Energy Efficient Items Adjustment",
    "Garage/Carport",
    "Garage/Carport Adjustment",
    "Porch/Patio/Deck",
    "Porch/Patio/Deck Adjustment",
    "Net Adjustment (Total)",
    "Adjusted Sale Price of Comparable",
];

pub(crate) const SALES_GRID_ADJUSTMENT_FIELDS: &[&str] = &[
    "Address",
    "Proximity to Subject",
    "Sale Price",
    "Sale Price/Gross Liv. Area",
    "Data Source(s)",
    "Verification Source(s)",
    "Sale or Financing Concessions Adjustment",
    "Date of Sale/Time Adjustment",
    "Location Adjustment",
    "Leasehold/Fee Simple Adjustment",
    "Site Adjustment",
    "View Adjustment",
    "Design (Style) Adjustment",
    "Quality of Construction Adjustment",
    "Actual Age Adjustment",
    "Condition Adjustment",
    "Gross Living Area Adjustment",
    "Basement & Finished Rooms Below Grade Adjustment",
    "Functional Utility Adjustment",
    "Heating/Cooling Adjustment",
    "Energy Efficient Items Adjustment",
    "Garage/Carport Adjustment",
    "Porch/Patio/Deck Adjustment",
    "Net Adjustment (Total)",
    "Adjusted Sale Price of Comparable",
];

pub(crate) const RENTAL_GRID_FIELDS: &[&str] = &[
    "Address",
    "Proximity to Subject",
    "Date Lease Begins",
    "Date Lease Expires",
    "Monthly Rental",
    "Less: Utilities, Furniture",
    "Adjusted Monthly Rent",
    "Data Source",
    "RENT ADJUSTMENTS",
    "Rent Concessions",
    "Location/View",
    "Design and Appeal",
    "Age/Condition",
    "Total room count",
    "Bdrms count",
    "Baths count",
    "Gross Living Area",
    "Other (e.g., basement, etc.)",
    "Other:",
    "Net Adj. (total)",
];

pub(crate) const SALE_HISTORY_FIELDS: &[&str] = &[
    "I ____ research the sale or transfer history of the subject property and comparable sales.(did/did not)",
    "If not, explain",
    "My research _____ reveal any prior sales or transfers of the subject property for the three years prior to the effective date of this appraisal.(did/did not)",
    "Data Source(s) for subject property research",
    "My research ______ reveal any prior sales or transfers of the comparable sales for the year prior to the date of sale of the comparable sale.(did/did not)",
    "Data Source(s) for comparable sales research",
    "Analysis of prior sale or transfer history of the subject property and comparable sales",
    "Date of Prior Sale/Transfer",
    "Price of Prior Sale/Transfer",
    "Data Source(s)",
    "Effective Date of Data Source(s)",
];

pub(crate) const RECONCILIATION_FIELDS: &[&str] = &[
    "Indicated Value by: Sales Comparison Approach $",
    "Cost Approach (if developed) $",
    "Income Approach (if developed) $",
    "This appraisal is made ('as is', 'subject to completion per plans and specifications on the basis of a hypothetical condition that the improvements have been completed', 'subject to the following repairs or alterations on the basis of a hypothetical condition that the repairs or alterations have been completed', or 'subject to the following required inspection based on the extraordinary assumption that the condition or deficiency does not require alteration or repair:')",
    "Opinion of Market Value $",
    "Effective Date of Value",
];

pub(crate) const COST_APPROACH_FIELDS: &[&str] = &[
    "Support for the opinion of site value (summary of comparable land sales or other methods for estimating site value)",
    "ESTIMATED (REPRODUCTION / REPLACEMENT COST NEW)",
    "Source of cost data",
    "Quality rating from cost service",
    "Effective date of cost data",
    "Opinion of Site Value",
    "Dwelling",
    "Garage/Carport",
    "Total Estimate of Cost-New",
    "Depreciation",
    "Depreciated Cost of Improvements",
    "As-is Value of Site Improvements",
    "Indicated Value By Cost Approach",
    "Comments on Cost Approach (gross living area calculations, depreciation, etc.)",
    "Estimated Remaining Economic Life (HUD and VA only)",
];

pub(crate) const INCOME_APPROACH_FIELDS: &[&str] = &[
    "Estimated Monthly Market Rent $",
    "X Gross Rent Multiplier = $",
    "Indicated Value by Income Approach",
];

pub(crate) const REPORT_DETAILS_FIELDS: &[&str] = &[
    "SCOPE OF WORK:",
    "INTENDED USE:",
    "INTENDED USER:",
    "DEFINITION OF MARKET VALUE:",
    "STATEMENT OF ASSUMPTIONS AND LIMITING CONDITIONS:",
    "SUPPLEMENTAL ADDENDUM",
    "E&O Insurance Expiration Date",
    "ADDITIONAL COMMENTS",
    "APPRAISER'S CERTIFICATION:",
    "SUPERVISORY APPRAISER'S CERTIFICATION:",
    "Analysis/Comments",
    "GENERAL INFORMATION ON ANY REQUIRED REPAIRS",
    "UNIFORM APPRAISAL DATASET (UAD) DEFINITIONS ADDENDUM",
    "This Report is one of the following types:",
    "Comments on Standards Rule 2-3",
    "Reasonable Exposure Time",
    "Comments on Appraisal and Report Identification",
];

pub(crate) const PUD_INFO_FIELDS: &[&str] = &[
    "Is the developer/builder in control of the Homeowners' Association (HOA)?",
    "Unit type(s)",
    "Provide the following information for PUDs ONLY if the developer/builder is in control of the HOA and the subject property is an attached dwelling unit.",
    "Legal Name of Project",
    "Total number of phases",
    "Total number of units",
    "Total number of units sold",
    "Total number of units rented",
    "Total number of units for sale",
    "Data source(s)",
    "Was the project created by the conversion of existing building(s) into a PUD?",
    " If Yes, date of conversion",
    "Does the project contain any multi-dwelling units? Yes No Data",
    "Are the units, common elements, and recreation facilities complete?",
    "If No, describe the status of completion.",
    "Are the common elements leased to or by the Homeowners' Association?",
    "If Yes, describe the rental terms and options.",
    "Describe common elements and recreational facilities.",
];

pub(crate) const APPRAISAL_ID_FIELDS: &[&str] = &[
    "This Report is one of the following types:",
    "Comments on Standards Rule 2-3",
    "Reasonable Exposure Time",
    "Comments on Appraisal and Report Identification",
];

pub(crate) const CERTIFICATION_FIELDS: &[&str] = &[
    "Signature",
    "Name",
    "Company Name",
    "Company Address",
    "Telephone Number",
    "Email Address",
    "Date of Signature and Report",
    "Effective Date of Appraisal",
    "State Certification # or State License # or Other (describe)",
    "State # or State",
    "Expiration Date of Certification or License",
    "ADDRESS OF PROPERTY APPRAISED",
    "APPRAISED VALUE OF SUBJECT PROPERTY $",
    "LENDER/CLIENT Name",
    "Lender/Client Company Name",
    "Lender/Client Company Address",
    "Lender/Client Email Address",
    "Appraiser Name on License",
    "License Number on License",
    "License State on License",
    "License Expiration Date on License",
    "E&O Expiration Date on Document",
];

pub(crate) const MARKET_CONDITIONS_FIELDS: &[&str] = &[
    "Inventory Analysis Total # of Comparable Sales (Settled)",
    "Inventory Analysis Absorption Rate (Total Sales/Months)",
    "Inventory Analysis Total # of Comparable Active Listings",
    "Inventory Analysis Months of Housing Supply (Total Listings/Ab.Rate)",
    "Median Sale & List Price, DOM, Sale/List % Median Comparable Sale Price",
    "Median Sale & List Price, DOM, Sale/List % Median Comparable Sales Days on Market",
    "Median Sale & List Price, DOM, Sale/List % Median Comparable List Price",
    "Median Sale & List Price, DOM, Sale/List % Median Comparable Listings Days on Market",
    "Median Sale & List Price, DOM, Sale/List % Median Sale Price as % of List Price",
    "Seller-(developer, builder, etc.) paid financial assistance prevalent?",
    "Explain in detail the seller concessions trends for the past 12 months (e.g., seller contributions increased from 3% to 5%, increasing use of buydowns, closing costs, condo fees, options, etc.).",
    "Are foreclosure sales (REO sales) a factor in the market?",
    "If yes, explain (including the trends in listings and sales of foreclosed properties).",
    "Cite data sources for above information.",
    "Summarize the above information as support for your conclusions in the Neighborhood section of the appraisal report form. If you used any additional information, such as an analysis of pending sales and/or expired and withdrawn listings, to formulate your conclusions, provide both an explanation and support for your conclusions.",
];

pub(crate) const CONDO_FIELDS: &[&str] = &[
    "Subject Project Data Total # of Comparable Sales (Settled)",
    "Subject Project Data Absorption Rate (Total Sales/Months)",
    "Subject Project Data Total # of Comparable Active Listings",
    "Subject Project Data Months of Unit Supply (Total Listings/Ab.Rate)",
    "Are foreclosure sales (REO sales) a factor in the project?",
    "If yes, indicate the number of REO listings and explain the trends in listings and sales of foreclosed properties.",
    "Summarize the above trends and address the impact on the subject unit and project.",
];

pub(crate) const STATE_REQUIREMENT_FIELDS: &[&str] = &[
    "Appraiser Fee Disclosure",
    "AMC License Disclosure",
    "AMC Fee Disclosure",
    "Smoke/CO Detector Requirements",
    "Water Heater Strapping",
    "State-Specific Legal Statements",
    "Invoice Copy Requirement",
];

pub(crate) const CLIENT_LENDER_REQUIREMENTS_FIELDS: &[&str] = &[
    "Report Condition (As Is)",
    "Repairs with 'As Is' Condition",
    "STR Comps for 1007 STR",
    "Occupancy for 1007 Orders",
    "Occupancy for 1025 Form",
    "Value vs. Listing/Contract Price (10% Rule)",
    "USPAP Compliance Addendum",
    "FIRREA Statement",
    "Required Photographs (Mechanicals, Kitchen, Roof)",
    "Kitchen Photo Refrigerator Check",
    "Comparable Distance Guideline (Urban)",
    "Comparable Distance Guideline (Suburban)",
    "Comparable Distance Guideline (Rural)",
    "Smoke/CO Detector Installation and Photos",
    "Smoke/CO Detector Presence (BPL)",
    "Value vs. Listing/Contract Price (10% Rule - BPL)",
    "Increase in Value Since Prior Sale",
    "Cost to Cure for Repairs",
    "Cost Approach Completion",
    "Room Photo Requirement (2 per room)",
    "Bedroom Photo Labeling",
    "Comparable Distance Guideline (Urban/Suburban - BPL)",
    "Comparable Distance Guideline (Rural - BPL)",
    "Multi-Family Unit Count Consistency",
    "Heating System Functionality",
    "Quality and Condition Ratings (Q/C)",
    "Invoice in Report (NY Only)",
    "Client Email Address Present",
    "SSR Score Check",
    "As-Is Value Order (2-Value Reports)",
    "Freddie Unacceptable Practices Review",
    "Report Completion Basis (Temple View)",
    "ARV Comps Gridded (Temple View)",
    "As-Is Comps and Value Comments (Temple View)",
    "Reviewer Instructions (LoanDepot)",
    "Reviewer Instructions (The Loan Store)",
    "Double Strapped Water Heater (UT Only)",
    "Value vs. Purchase Price (GFL)",
    "1004MC Requirement (Cardinal)",
    "Smoke/CO Detector Comments (OCMBC)",
    "Water Heater Strapping Comments (OCMBC)",
    "Reviewer Instructions (Paramount)",
    "Short-Term Rental Regulations (Arc Home)",
    "Borrower Name Handling (CV3)",
    "Hurricane Damage Statement (FL)",
    "Hurricane Damage Statement (GA, NC, SC, TN, VA)",
    "Smoke/CO Detector and Photos (Logan Finance)",
    "1004MC Requirement (NAF)",
    "Health and Safety Issues (NAF)",
    "Reviewer Instructions (NAF)",
    "'Subject-To' Condition Advisory (Haus Capital)",
    "Intended User Statement (Equity Wave)",
    "Intended Use Statement (Equity Wave)",
    "STR 1007 Form Requirement (Foundation Mortgage)",
    "Health and Safety Subject To (Rain City)",
    "2-Value Report Format (Rain City)",
    "Cost to Cure for Cosmetic Items (Rain City)",
    "1004MC Requirement (Rain City)",
    "Cost Approach Requirement (East Coast Capital)",
    "Report Completion Basis (Malama Funding)",
    "ARV Comps Gridded (Malama Funding)",
    "As-Is Comps and Value Comments (Malama Funding)",
    "Prior Services Statement (National Loan/Easy Street)",
    "ENV Requirement (Kind Lending)",
    "1004MC Requirement (Kind Lending)",
    "ENV Requirement (Dart Bank)",
    "As-is with ARV Report Condition (Futures Financial)",
    "Desktop Report Condition (Futures Financial)",
    "E&O Insurance Attached (Champions)",
    "Value vs. Predominant Value (Champions)",
    "Smoke/CO Detector Check (Champions)",
    "Stove in Kitchen Photo (Champions)",
    "1004MC Requirement (Deephaven)",
    "QC Ratings Requirement (Loanguys)",
    "Desk Review Escalation (Eastview)",
    "Desk Review Form Type (Eastview)",
];

pub(crate) const D1004_FIELDS: &[&str] = &[
    "Property Address",
    "Unit #",
    "City",
    "State",
    "Zip Code",
    "Legal Description",
    "County",
    "Borrower",
    "Contract Price $",
    "Date of Contract",
    "Effective Date of Original Appraisal",
    "Property Rights Appraised",
    "Original Appraised Value $",
    "Original Appraiser",
    "Company Name",
    "Original Lender/Client",
    "Address",
    "SUMMARY APPRAISAL UPDATE REPORT (checkbox)",
    "HAS THE MARKET VALUE OF THE SUBJECT PROPERTY DECLINED SINCE THE EFFECTIVE DATE OF THE PRIOR APPRAISAL? (Yes/No)",
    "My opinion of the market value of the subject property as of the effective date of this appraisal update is",
    "CERTIFICATION OF COMPLETION (checkbox)",
    "HAVE THE IMPROVEMENTS BEEN COMPLETED IN ACCORDANCE WITH THE REQUIREMENTS AND CONDITIONS STATED IN THE ORIGINAL APPRAISAL REPORT? (Yes/No)",
    "If No, describe the impact on the opinion of market value",
    "Date of Inspection (for Certification of Completion)",
    "Date of Signature and Report",
];

pub(crate) const ESCALATION_CHECKLIST: &[(&str, &[&str])] = &[
    (
        "Order Form vs. Report Mismatches",
        &[
            "Verify Assignment Type matches between Order Form and Report.",
            "Verify Appraisal Type matches between Order Form and Report.",
            "Verify Appraiser Name matches between Order Form and Report.",
            "Verify Lender/Client Name matches between Order Form and Report.",
            "Verify Appraiser Fee matches between Engagement Letter and Report/Invoice.",
        ],
    ),
    (
        "Critical Report Conditions",
        &[
            "Check if 'Zoning Compliance' in the Site section is marked as 'Illegal'.",
            "Check if 'Highest and Best Use' in the Site section is marked as 'No'.",
            "Check if 'Physical Deficiencies' in the Improvements section is 'Yes' but the report is made 'As-Is' in Reconciliation.",
            "Check if photos or comments indicate multiple repairs are needed, but the report is made 'As-Is'.",
        ],
    ),
    (
        "Value and Price Analysis",
        &[
            "Check if the final appraised value is more than 10% higher than the lowest unadjusted comparable sale price.",
            "Check if the final appraised value is higher than the subject's list price, purchase price, and most recent prior sale price.",
            "Check if the appraised value is significantly higher than the purchase price and if an explanation is provided.",
            "Check if there has been a significant increase in value since the subject's prior sale and if an explanation is provided.",
        ],
    ),
    (
        "Sales Grid and Adjustments",
        &[
            "Check for any single adjustment in the sales grid that appears drastically large relative to the sale price.",
            "Check if the subject's 'Location' in the sales grid is marked as 'Commercial'.",
            "Check if any 'Date of Sale/Time' adjustments are present and if a detailed explanation based on market data is provided.",
        ],
    ),
    (
        "Property and Data Consistency",
        &[
            "Check if the subject property's address is also used as a comparable or rental property.",
            "For a 1004 (Single Family) report, check if there is evidence of more than one kitchen and if its legality is discussed.",
            "Verify the report's 'Effective Date' matches the 'Inspection Date' from the order form or other records.",
            "Check if the appraiser listed on the order form signed as the 'Supervisory Appraiser' instead of the primary appraiser.",
        ],
    ),
    (
        "Loan and Form Type Compliance",
        &[
            "If the order form specifies a USDA loan, verify the report is not completed on an FHA form (e.g., 1004 FHA).",
        ],
    ),
    (
        "Prohibited Language",
        &[
            "Search the 'Neighborhood Description' for the phrase 'average condition' in a non-FHA report.",
        ],
    ),
];
